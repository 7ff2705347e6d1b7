use std::panic;
use leptos::logging::log;

/// Forwards panics to the browser console and adds context for Leptos owner
/// disposal panics, which usually mean a request resolved after its view was
/// torn down and touched something it no longer owns.
pub fn set_custom_panic_hook() {
    panic::set_hook(Box::new(move |panic_info| {
        console_error_panic_hook::hook(panic_info);

        let message = panic_message(panic_info.payload());
        if is_owner_disposal(&message) {
            log!("[PANIC] Leptos owner disposal detected. This usually happens when:");
            log!("[PANIC] 1. A review list or detail panel was unmounted while its request was in flight");
            log!("[PANIC] 2. A callback ran after its component was cleaned up");
            log!("[PANIC] Use try_update/try_set for writes made after an await point");
        }
    }));
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}

fn is_owner_disposal(message: &str) -> bool {
    message.contains("OwnerDisposed") || message.contains("disposed")
}

/// Call once from the client entry point.
pub fn init() {
    set_custom_panic_hook();
    log!("[PANIC_HOOK] Custom panic hook set up");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_string_and_str_payloads() {
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("boom"));
        let borrowed: Box<dyn std::any::Any + Send> = Box::new("bang");
        let other: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(owned.as_ref()), "boom");
        assert_eq!(panic_message(borrowed.as_ref()), "bang");
        assert_eq!(panic_message(other.as_ref()), "Unknown panic");
    }

    #[test]
    fn recognises_disposal_messages() {
        assert!(is_owner_disposal("tried to access a signal that was OwnerDisposed"));
        assert!(!is_owner_disposal("index out of bounds"));
    }
}
