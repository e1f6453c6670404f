use crate::alert::AlertItem;

/// Derives the thread key that groups repeated occurrences of the same error
/// into one chat thread.
///
/// A configured static key collapses every alert into a single thread.
/// Otherwise the key follows the item counter, so each distinct error gets
/// its own thread; `project_id` stands in when the counter is absent.
pub fn derive_thread_key(static_key: Option<&str>, item: &AlertItem) -> String {
    if let Some(key) = static_key {
        return key.to_owned();
    }

    match item.counter.or(item.project_id) {
        Some(id) => format!("rollbar-item-{id}"),
        None => "rollbar-item-unknown".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with(counter: Option<i64>, project_id: Option<i64>) -> AlertItem {
        AlertItem {
            counter,
            project_id,
            ..Default::default()
        }
    }

    #[test]
    fn test_static_key_wins() {
        let item = item_with(Some(7), Some(42));
        assert_eq!(
            derive_thread_key(Some("rollbar-global-thread"), &item),
            "rollbar-global-thread"
        );
    }

    #[test]
    fn test_counter_based_key() {
        assert_eq!(
            derive_thread_key(None, &item_with(Some(7), Some(42))),
            "rollbar-item-7"
        );
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(
            derive_thread_key(None, &item_with(None, Some(42))),
            "rollbar-item-42"
        );
        assert_eq!(
            derive_thread_key(None, &item_with(None, None)),
            "rollbar-item-unknown"
        );
    }

    #[test]
    fn test_same_counter_same_key() {
        let a = derive_thread_key(None, &item_with(Some(9), Some(1)));
        let b = derive_thread_key(None, &item_with(Some(9), Some(2)));
        assert_eq!(a, b);

        let c = derive_thread_key(None, &item_with(Some(10), Some(1)));
        assert_ne!(a, c);
    }
}
