//! Element animation driver.
//!
//! All element changes are expressed as [`Transition`] values and applied by
//! the [`AnimationDriver`], which owns exactly one animation slot per element.
//! Starting an animation on an element always cancels the one already running
//! on it first, so two animations can never race on the same element.
//!
//! The driver runs on the same virtual clock as the timer scheduler. Values
//! are interpolated lazily; completion (final value plus any end visibility)
//! is applied when the clock passes the animation's end.

mod easing;
mod element;

use serde::Serialize;

pub use self::easing::{Interpolator, apply_easing, ease_in, ease_out, lerp};
pub use self::element::{Element, ElementState, Property, Visibility};

// ============================================================================
// Types
// ============================================================================

/// A change to one element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Transition {
    /// Animates `property` towards `to`.
    #[serde(rename_all = "camelCase")]
    Animate {
        element: Element,
        property: Property,
        to: f32,
        duration_ms: u64,
        delay_ms: u64,
        interpolator: Interpolator,
        /// Visibility applied when the animation completes. Never applied on cancel.
        end_visibility: Option<Visibility>,
    },
    /// Sets visibility immediately.
    SetVisibility { element: Element, visibility: Visibility },
    /// Sets a property immediately.
    SetProperty {
        element: Element,
        property: Property,
        value: f32,
    },
    /// Stops the running animation, leaving the element at its current value.
    Cancel { element: Element },
}

impl Transition {
    /// An undelayed linear animation.
    #[must_use]
    pub const fn animate(element: Element, property: Property, to: f32, duration_ms: u64) -> Self {
        Self::Animate {
            element,
            property,
            to,
            duration_ms,
            delay_ms: 0,
            interpolator: Interpolator::Linear,
            end_visibility: None,
        }
    }

    #[must_use]
    pub const fn with_delay(self, delay: u64) -> Self {
        match self {
            Self::Animate {
                element,
                property,
                to,
                duration_ms,
                interpolator,
                end_visibility,
                ..
            } => Self::Animate {
                element,
                property,
                to,
                duration_ms,
                delay_ms: delay,
                interpolator,
                end_visibility,
            },
            other => other,
        }
    }

    #[must_use]
    pub const fn with_interpolator(self, curve: Interpolator) -> Self {
        match self {
            Self::Animate {
                element,
                property,
                to,
                duration_ms,
                delay_ms,
                end_visibility,
                ..
            } => Self::Animate {
                element,
                property,
                to,
                duration_ms,
                delay_ms,
                interpolator: curve,
                end_visibility,
            },
            other => other,
        }
    }

    /// Sets the visibility applied when the animation completes.
    #[must_use]
    pub const fn then(self, visibility: Visibility) -> Self {
        match self {
            Self::Animate {
                element,
                property,
                to,
                duration_ms,
                delay_ms,
                interpolator,
                ..
            } => Self::Animate {
                element,
                property,
                to,
                duration_ms,
                delay_ms,
                interpolator,
                end_visibility: Some(visibility),
            },
            other => other,
        }
    }

    #[must_use]
    pub const fn element(&self) -> Element {
        match self {
            Self::Animate { element, .. }
            | Self::SetVisibility { element, .. }
            | Self::SetProperty { element, .. }
            | Self::Cancel { element } => *element,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct RunningAnimation {
    property: Property,
    from: f32,
    to: f32,
    start_ms: u64,
    duration_ms: u64,
    interpolator: Interpolator,
    end_visibility: Option<Visibility>,
}

impl RunningAnimation {
    const fn end_ms(&self) -> u64 { self.start_ms.saturating_add(self.duration_ms) }

    #[allow(clippy::cast_precision_loss)] // durations are a few hundred ms
    fn value_at(&self, now_ms: u64) -> f32 {
        if now_ms <= self.start_ms {
            return self.from;
        }
        if now_ms >= self.end_ms() || self.duration_ms == 0 {
            return self.to;
        }
        let t = (now_ms - self.start_ms) as f32 / self.duration_ms as f32;
        lerp(self.from, self.to, apply_easing(t, self.interpolator))
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Owns element state and the one animation slot per element.
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    now_ms: u64,
    states: [ElementState; Element::COUNT],
    running: [Option<RunningAnimation>; Element::COUNT],
    log: Vec<Transition>,
}

impl Default for AnimationDriver {
    fn default() -> Self { Self::new() }
}

impl AnimationDriver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            states: [ElementState::default(); Element::COUNT],
            running: [None; Element::COUNT],
            log: Vec::new(),
        }
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 { self.now_ms }

    /// Applies one transition at the current time.
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Animate {
                element,
                property,
                to,
                duration_ms,
                delay_ms,
                interpolator,
                end_visibility,
            } => {
                self.cancel(element);
                self.log.push(transition);
                let from = self.states[element.index()].get(property);
                self.running[element.index()] = Some(RunningAnimation {
                    property,
                    from,
                    to,
                    start_ms: self.now_ms.saturating_add(delay_ms),
                    duration_ms,
                    interpolator,
                    end_visibility,
                });
                if delay_ms == 0 && duration_ms == 0 {
                    self.complete(element);
                }
            }
            Transition::SetVisibility { element, visibility } => {
                self.log.push(transition);
                self.states[element.index()].visibility = visibility;
            }
            Transition::SetProperty { element, property, value } => {
                if self.running[element.index()].is_some_and(|anim| anim.property == property) {
                    self.cancel(element);
                }
                self.log.push(transition);
                self.states[element.index()].set(property, value);
            }
            Transition::Cancel { element } => self.cancel(element),
        }
    }

    /// Applies transitions in order.
    pub fn apply_all(&mut self, transitions: impl IntoIterator<Item = Transition>) {
        for transition in transitions {
            self.apply(transition);
        }
    }

    pub fn set_visibility(&mut self, element: Element, visibility: Visibility) {
        self.apply(Transition::SetVisibility { element, visibility });
    }

    pub fn set_property(&mut self, element: Element, property: Property, value: f32) {
        self.apply(Transition::SetProperty { element, property, value });
    }

    /// Stops the running animation on `element`, freezing its current value.
    /// The end visibility of a cancelled animation is never applied.
    pub fn cancel(&mut self, element: Element) {
        if let Some(anim) = self.running[element.index()].take() {
            let value = anim.value_at(self.now_ms);
            self.states[element.index()].set(anim.property, value);
            self.log.push(Transition::Cancel { element });
            tracing::trace!(?element, "animation cancelled");
        }
    }

    pub fn cancel_all(&mut self, elements: &[Element]) {
        for element in elements {
            self.cancel(*element);
        }
    }

    /// Moves the clock forward, completing animations that have ended.
    pub fn advance(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        for element in Element::ALL {
            if self.running[element.index()].is_some_and(|anim| anim.end_ms() <= self.now_ms) {
                self.complete(element);
            }
        }
    }

    /// Jumps every running animation to its end state.
    pub fn finish_all(&mut self) {
        for element in Element::ALL {
            self.complete(element);
        }
    }

    fn complete(&mut self, element: Element) {
        if let Some(anim) = self.running[element.index()].take() {
            let state = &mut self.states[element.index()];
            state.set(anim.property, anim.to);
            if let Some(visibility) = anim.end_visibility {
                state.visibility = visibility;
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub const fn is_animating(&self, element: Element) -> bool {
        self.running[element.index()].is_some()
    }

    #[must_use]
    pub const fn visibility(&self, element: Element) -> Visibility {
        self.states[element.index()].visibility
    }

    #[must_use]
    pub fn is_visible(&self, element: Element) -> bool {
        self.visibility(element) == Visibility::Visible
    }

    /// Current value of `property`, interpolated if it is animating.
    #[must_use]
    pub fn value(&self, element: Element, property: Property) -> f32 {
        match self.running[element.index()] {
            Some(anim) if anim.property == property => anim.value_at(self.now_ms),
            _ => self.states[element.index()].get(property),
        }
    }

    /// Current state of `element` with animated values interpolated.
    #[must_use]
    pub fn state(&self, element: Element) -> ElementState {
        let mut state = self.states[element.index()];
        if let Some(anim) = self.running[element.index()] {
            state.set(anim.property, anim.value_at(self.now_ms));
        }
        state
    }

    /// Transitions applied since the last drain, oldest first.
    pub fn drain_log(&mut self) -> Vec<Transition> { std::mem::take(&mut self.log) }
}
