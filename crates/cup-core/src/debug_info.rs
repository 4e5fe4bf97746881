use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, RwLock},
};

use serde::{Deserialize, Serialize};

use crate::Vector2;

static DEBUG_MAP: OnceLock<Arc<RwLock<DebugMap>>> = OnceLock::new();

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DebugColor {
    #[default]
    Red,
    Green,
    Orange,
    Purple,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum DebugShape {
    Cross {
        center: Vector2,
        color: DebugColor,
    },
    Line {
        start: Vector2,
        end: Vector2,
        color: DebugColor,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum DebugValue {
    Shape(DebugShape),
    Number(f64),
    String(String),
}

/// A map of debug messages.
///
/// # Key format
///
/// Keys are `snake_case`, with `.` separating the parts of a key. Values that
/// belong to a robot use `p{slot}.{value}`, e.g. `p0.chase_state`.
pub type DebugMap = HashMap<String, DebugValue>;

/// Read handle on the process-wide debug map.
///
/// Records are only kept once a subscriber exists; before that every
/// `debug_*` call is a no-op.
#[derive(Clone)]
pub struct DebugSubscriber {
    map: Arc<RwLock<DebugMap>>,
}

impl DebugSubscriber {
    /// Start collecting debug records. Subsequent calls share the same map.
    pub fn spawn() -> Self {
        let map = DEBUG_MAP
            .get_or_init(|| Arc::new(RwLock::new(HashMap::new())))
            .clone();
        Self { map }
    }

    /// Get a copy of the current debug map.
    pub fn get_copy(&self) -> DebugMap {
        self.map.read().map(|m| m.clone()).unwrap_or_default()
    }
}

/// Record a debug message.
pub fn debug_record(key: impl Into<String>, value: DebugValue) {
    if let Some(map) = DEBUG_MAP.get() {
        if let Ok(mut map) = map.write() {
            map.insert(key.into(), value);
        }
    }
}

/// Remove a debug message.
pub fn debug_remove(key: impl Into<String>) {
    if let Some(map) = DEBUG_MAP.get() {
        if let Ok(mut map) = map.write() {
            map.remove(&key.into());
        }
    }
}

/// Record a debug message with a cross.
pub fn debug_cross(key: impl Into<String>, center: Vector2, color: DebugColor) {
    debug_record(key, DebugValue::Shape(DebugShape::Cross { center, color }));
}

/// Record a debug message with a line.
pub fn debug_line(key: impl Into<String>, start: Vector2, end: Vector2, color: DebugColor) {
    debug_record(key, DebugValue::Shape(DebugShape::Line { start, end, color }));
}

/// Record a debug message with a numeric value.
pub fn debug_value(key: impl Into<String>, value: f64) {
    debug_record(key, DebugValue::Number(value));
}

/// Record a debug message with a string.
pub fn debug_string(key: impl Into<String>, value: impl Into<String>) {
    debug_record(key, DebugValue::String(value.into()));
}
