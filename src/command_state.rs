// src/command_state.rs

use crate::{
    error::{AppError, AppResult},
    session::SessionStore,
    sink::BoxedSink,
    types::AppState,
};
use std::sync::MutexGuard;

// ======================================================
// locking helpers
// ======================================================

pub fn lock_session<'a>(state: &'a AppState) -> AppResult<MutexGuard<'a, SessionStore>> {
    state
        .session
        .lock()
        .map_err(|_| AppError::StateLockPoisoned)
}

pub fn lock_sink<'a>(state: &'a AppState) -> AppResult<MutexGuard<'a, BoxedSink>> {
    state.sink.lock().map_err(|_| AppError::StateLockPoisoned)
}

// ======================================================
// Unit Tests
// ======================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::UnconfiguredSink;
    use crate::template::FormSchema;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    fn mk_state() -> AppState {
        let schema = Arc::new(FormSchema::builtin().expect("schema"));
        let session = SessionStore::new(
            &schema,
            Default::default(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        AppState {
            schema,
            session: Mutex::new(session),
            sink: Mutex::new(Box::new(UnconfiguredSink::new("test"))),
        }
    }

    #[test]
    fn session_guard_mutates_in_place() {
        let state = mk_state();
        lock_session(&state)
            .unwrap()
            .set_text("day_1_value_prop", "X")
            .unwrap();

        assert_eq!(
            lock_session(&state).unwrap().text("day_1_value_prop"),
            Some("X")
        );
    }

    #[test]
    fn poisoned_session_lock_is_reported() {
        let state = mk_state();

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _g = state.session.lock().unwrap();
            panic!("poison");
        }));

        match lock_session(&state) {
            Err(AppError::StateLockPoisoned) => {}
            Err(other) => panic!("expected StateLockPoisoned, got {other:?}"),
            Ok(_) => panic!("expected StateLockPoisoned, got a guard"),
        };
    }
}
