// src/types.rs

use std::sync::{Arc, Mutex};

use crate::session::SessionStore;
use crate::sink::BoxedSink;
use crate::template::FormSchema;

pub struct AppState {
    // immutable after startup
    pub schema: Arc<FormSchema>,

    // one user, one session; discarded on exit
    pub session: Mutex<SessionStore>,

    // destination for submissions (may be the unconfigured stand-in)
    pub sink: Mutex<BoxedSink>,
}
