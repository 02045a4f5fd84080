//! Shared, observable theme preference.
//!
//! One [`ThemePreference`] is created at startup and cloned into every widget that cares about
//! the visual mode. All clones share state, so a toggle from any [`crate::theme_switch::ThemeSwitch`]
//! is seen by every other consumer, and subscribers are notified synchronously.
//!
//! The preference is persisted through a [`KeyValueStore`] under [`THEME_KEY`] as `"dark"` or
//! `"light"`. Storage failures are logged and otherwise behave like "nothing stored".

use crate::error::Result;
use crate::theme::Theme;
use crate::theme::ThemeMode;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;
use tracing::warn;

pub const THEME_KEY: &str = "theme";

/// A small persistent string map.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory [`KeyValueStore`].
///
/// Clones share the same map, which lets tests and hosts keep a handle on what was written.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// System-level "prefers dark" signal, consulted only when nothing is stored.
pub trait SystemAppearance {
    fn prefers_dark(&self) -> bool;
}

/// Reads the `COLORFGBG` convention (`"fg;bg"`) exported by many terminals.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvAppearance;

impl SystemAppearance for EnvAppearance {
    fn prefers_dark(&self) -> bool {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| colorfgbg_is_dark(&v))
            .unwrap_or(false)
    }
}

/// Returns whether a `COLORFGBG` value describes a dark background, or `None` if unparsable.
pub fn colorfgbg_is_dark(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FixedAppearance(pub bool);

impl SystemAppearance for FixedAppearance {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(ThemeMode)>;

struct Inner {
    mode: ThemeMode,
    store: Box<dyn KeyValueStore>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
    notifying: bool,
    /// Mode set by a subscriber while a notification round was running.
    pending_mode: Option<ThemeMode>,
    pending_removals: Vec<SubscriptionId>,
}

/// Cloneable handle to the shared theme mode.
#[derive(Clone)]
pub struct ThemePreference {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ThemePreference")
            .field("mode", &inner.mode)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl ThemePreference {
    /// Resolves the initial mode and wraps `store` for later writes.
    ///
    /// Precedence: stored value, then `appearance`, then light.
    pub fn load(store: impl KeyValueStore + 'static, appearance: &dyn SystemAppearance) -> Self {
        let mode = initial_mode(&store, appearance);
        debug!(mode = %mode, "theme preference loaded");
        Self {
            inner: Rc::new(RefCell::new(Inner {
                mode,
                store: Box::new(store),
                subscribers: Vec::new(),
                next_id: 0,
                notifying: false,
                pending_mode: None,
                pending_removals: Vec::new(),
            })),
        }
    }

    /// A preference that starts in `mode` and persists nowhere.
    pub fn ephemeral(mode: ThemeMode) -> Self {
        let pref = Self::load(MemoryStore::new(), &FixedAppearance(false));
        pref.inner.borrow_mut().mode = mode;
        pref
    }

    pub fn mode(&self) -> ThemeMode {
        self.inner.borrow().mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode().is_dark()
    }

    /// Palette for the current mode.
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.mode())
    }

    /// Flips the mode, persists it, notifies subscribers and returns the new mode.
    pub fn toggle(&self) -> ThemeMode {
        let next = self.mode().toggled();
        self.apply(next);
        next
    }

    /// Sets an explicit mode. Returns `false` (and does nothing) if it was already active.
    pub fn set_mode(&self, mode: ThemeMode) -> bool {
        if self.mode() == mode {
            return false;
        }
        self.apply(mode);
        true
    }

    pub fn subscribe(&self, f: impl FnMut(ThemeMode) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.notifying {
            inner.pending_removals.push(id);
            return true;
        }
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id);
        inner.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn apply(&self, mode: ThemeMode) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.mode = mode;
            if let Err(err) = inner.store.set(THEME_KEY, mode.as_str()) {
                warn!(error = %err, mode = %mode, "failed to persist theme preference");
            }
        }
        debug!(mode = %mode, "theme preference changed");
        self.notify(mode);
    }

    // Subscribers run without the state borrowed so they may read the preference (or subscribe
    // and unsubscribe) from inside the callback. A change made from a callback is queued and
    // delivered to every subscriber in another round once the current one finishes.
    fn notify(&self, mode: ThemeMode) {
        let mut subscribers = {
            let mut inner = self.inner.borrow_mut();
            if inner.notifying {
                inner.pending_mode = Some(mode);
                return;
            }
            inner.notifying = true;
            std::mem::take(&mut inner.subscribers)
        };
        let mut mode = mode;
        loop {
            for (_, f) in subscribers.iter_mut() {
                f(mode);
            }
            let mut inner = self.inner.borrow_mut();
            let added = std::mem::take(&mut inner.subscribers);
            subscribers.extend(added);
            let removed = std::mem::take(&mut inner.pending_removals);
            subscribers.retain(|(id, _)| !removed.contains(id));
            match inner.pending_mode.take() {
                Some(next) => mode = next,
                None => {
                    inner.notifying = false;
                    inner.subscribers = subscribers;
                    return;
                }
            }
        }
    }
}

fn initial_mode(store: &dyn KeyValueStore, appearance: &dyn SystemAppearance) -> ThemeMode {
    let stored = match store.get(THEME_KEY) {
        Ok(v) => v.filter(|v| !v.trim().is_empty()),
        Err(err) => {
            warn!(error = %err, "failed to read theme preference, falling back to system");
            None
        }
    };
    match stored {
        Some(value) => ThemeMode::from_stored(&value),
        None if appearance.prefers_dark() => ThemeMode::Dark,
        None => ThemeMode::Light,
    }
}
