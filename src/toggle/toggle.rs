use super::config::{OnChange, ToggleConfig};
use crate::error::Result;
use crate::guard::{Diagnostic, ModeGuard};
use crate::handler::Handler;
use crate::props::{PropsBag, PRESSED_ATTR};
use crate::reducer::{Action, Reducer, ToggleState};
use crate::store::{Store, Subscription};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

// The inputs re-supplied by the owner on every update.
struct Props {
    on: Option<bool>,
    on_change: Option<OnChange>,
    reducer: Reducer,
}

// The guard plus what it reported at its latest observation.
struct Observer {
    guard: ModeGuard,
    last: Vec<Diagnostic>,
}

struct Inner {
    store: Store<ToggleState>,
    initial_state: ToggleState,
    props: RwLock<Props>,
    observer: Mutex<Observer>,
}

/// A toggle controller.
///
/// `Toggle` is a cheap handle; clones drive the same instance. Separately
/// created toggles never share state, even when their owner feeds them the
/// same controlled value.
///
/// # Examples
///
/// Uncontrolled:
///
/// ```
/// use flipswitch::{Toggle, ToggleConfig};
///
/// let toggle = Toggle::new(ToggleConfig::new().initial_on(true));
/// toggle.toggle().unwrap();
/// assert!(!toggle.on());
/// toggle.reset().unwrap();
/// assert!(toggle.on());
/// ```
///
/// Controlled, where the owner decides what happens with a proposal:
///
/// ```
/// use flipswitch::{Toggle, ToggleConfig};
/// use std::sync::{Arc, Mutex};
///
/// let proposed = Arc::new(Mutex::new(None));
/// let config = {
///     let proposed = proposed.clone();
///     ToggleConfig::new()
///         .controlled(false)
///         .on_change(move |state, _action| *proposed.lock().unwrap() = Some(state.on))
/// };
/// let toggle = Toggle::new(config);
///
/// toggle.toggle().unwrap();
/// assert_eq!(*proposed.lock().unwrap(), Some(true));
/// assert!(!toggle.on());
/// ```
#[derive(Clone)]
pub struct Toggle {
    inner: Arc<Inner>,
}

impl Toggle {
    /// Create a toggle and record its first observation.
    pub fn new(config: ToggleConfig) -> Self {
        let ToggleConfig {
            initial_on,
            reducer,
            on,
            on_change,
            diagnostics,
        } = config;

        let initial_state = ToggleState::new(initial_on);
        let mut guard = ModeGuard::new(on, diagnostics);
        let last = guard.observe(on, on_change.is_some());

        Self {
            inner: Arc::new(Inner {
                store: Store::new(initial_state),
                initial_state,
                props: RwLock::new(Props {
                    on,
                    on_change,
                    reducer,
                }),
                observer: Mutex::new(Observer { guard, last }),
            }),
        }
    }

    /// Re-supply the owner's inputs for the next cycle.
    ///
    /// The new inputs are committed first; the mode guard then compares the
    /// committed `on` against the one seen at the previous update.
    /// `initial_on` is ignored.
    pub fn update(&self, config: ToggleConfig) {
        let ToggleConfig {
            reducer,
            on,
            on_change,
            diagnostics,
            ..
        } = config;
        let has_on_change = on_change.is_some();

        *self.inner.props.write().unwrap_or_else(PoisonError::into_inner) = Props {
            on,
            on_change,
            reducer,
        };

        let mut observer = self.inner.observer.lock().unwrap_or_else(PoisonError::into_inner);
        observer.guard.set_enabled(diagnostics);
        observer.last = observer.guard.observe(on, has_on_change);
    }

    /// Diagnostics emitted by the latest observation (creation or update).
    ///
    /// Empty when diagnostics are disabled.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.inner
            .observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last
            .clone()
    }

    /// Whether an external `on` value is currently supplied.
    pub fn is_controlled(&self) -> bool {
        self.read_props(|props| props.on.is_some())
    }

    /// The effective state: the controlled value if any, else the committed one.
    pub fn on(&self) -> bool {
        self.read_props(|props| props.on)
            .unwrap_or_else(|| self.inner.store.read(|state| state.on))
    }

    /// The internally committed state, which is frozen while controlled.
    pub fn internal_state(&self) -> ToggleState {
        self.inner.store.get()
    }

    /// The state this toggle was created with.
    pub fn initial_state(&self) -> ToggleState {
        self.inner.initial_state
    }

    /// Flip the toggle, or propose flipping it when controlled.
    pub fn toggle(&self) -> Result<()> {
        self.dispatch(Action::Toggle)
    }

    /// Return to the initial state, or propose it when controlled.
    pub fn reset(&self) -> Result<()> {
        self.dispatch(Action::Reset {
            initial_state: self.inner.initial_state,
        })
    }

    /// Dispatch an action through the reducer.
    ///
    /// The reducer always runs, seeded from the effective state, so a
    /// rejected action fails in both modes. When uncontrolled the result is
    /// committed; in both modes it is passed to `on_change`. Nothing is
    /// committed or notified before the reducer has succeeded.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        let (controlled_on, on_change, reducer) = self.read_props(|props| {
            (props.on, props.on_change.clone(), Arc::clone(&props.reducer))
        });

        // `on` is the only field, so the effective value is the whole seed.
        let seed = match controlled_on {
            Some(on) => ToggleState::new(on),
            None => self.inner.store.get(),
        };
        let suggested = reducer(&seed, &action)?;

        tracing::debug!(
            action = %action.kind(),
            controlled = controlled_on.is_some(),
            suggested = ?suggested,
            "dispatching toggle action"
        );

        if controlled_on.is_none() {
            self.inner.store.commit(suggested);
        }
        if let Some(on_change) = on_change {
            on_change(&suggested, &action);
        }
        Ok(())
    }

    /// Props for the element that flips the toggle.
    ///
    /// The result carries [`PRESSED_ATTR`] set to the effective state, then
    /// every caller attribute (a caller value wins). Its click handler runs
    /// the caller's `on_click` first and then [`Toggle::toggle`].
    pub fn toggler_props<E: 'static>(&self, overrides: PropsBag<E>) -> PropsBag<E> {
        let defaults = PropsBag::new()
            .attr(PRESSED_ATTR, self.on())
            .with_on_click(self.handler(Self::toggle));
        PropsBag::merge(defaults, overrides)
    }

    /// Props for the element that resets the toggle.
    ///
    /// Same merge rules as [`Toggle::toggler_props`], without the pressed
    /// attribute and with [`Toggle::reset`] as the internal handler.
    pub fn resetter_props<E: 'static>(&self, overrides: PropsBag<E>) -> PropsBag<E> {
        let defaults = PropsBag::new().with_on_click(self.handler(Self::reset));
        PropsBag::merge(defaults, overrides)
    }

    /// Run `callback` after every committed internal state change.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ToggleState) + Send + Sync + 'static,
    {
        self.inner.store.subscribe(callback)
    }

    /// A handle that does not keep the toggle alive.
    ///
    /// Capture this instead of a `Toggle` inside the toggle's own
    /// `on_change`, or the callback and the toggle keep each other alive.
    pub fn downgrade(&self) -> WeakToggle {
        WeakToggle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    // Handlers hold the toggle weakly; once every handle is gone they do nothing.
    fn handler<E: 'static>(&self, op: fn(&Self) -> Result<()>) -> Handler<E> {
        let weak = self.downgrade();
        Handler::try_new(move |_: &E| match weak.upgrade() {
            Some(toggle) => op(&toggle),
            None => {
                tracing::trace!("click on a dropped toggle ignored");
                Ok(())
            }
        })
    }

    fn read_props<R>(&self, f: impl FnOnce(&Props) -> R) -> R {
        let props = self.inner.props.read().unwrap_or_else(PoisonError::into_inner);
        f(&props)
    }
}

/// A non-owning [`Toggle`] handle, see [`Toggle::downgrade`].
#[derive(Clone)]
pub struct WeakToggle {
    inner: Weak<Inner>,
}

impl WeakToggle {
    /// The toggle, unless every strong handle has been dropped.
    pub fn upgrade(&self) -> Option<Toggle> {
        self.inner.upgrade().map(|inner| Toggle { inner })
    }
}

impl fmt::Debug for WeakToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakToggle")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl fmt::Debug for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toggle")
            .field("on", &self.on())
            .field("controlled", &self.is_controlled())
            .field("internal", &self.internal_state())
            .field("initial", &self.inner.initial_state)
            .finish()
    }
}
