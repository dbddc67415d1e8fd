//! Role-slot binding for surfaces that expose fixed affirmative/neutral/negative buttons.
//!
//! When several actions share a role, the first registered one wins and the rest are not shown.

use crate::types::{DialogActionView, DialogOutcome, DialogRole};

/// Label used by [`RoleSlots::with_dismiss_fallback`] callers that have no localized text.
pub const DEFAULT_DISMISS_LABEL: &str = "Close";

/// What occupies one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotBinding {
    /// The prompt action at this index.
    Action(usize),
    /// A renderer-provided button that dismisses the dialog.
    Dismiss {
        /// Button label.
        label: String,
    },
}

/// Slot assignment for a three-button surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSlots {
    /// Affirmative slot.
    pub affirmative: Option<SlotBinding>,
    /// Neutral slot.
    pub neutral: Option<SlotBinding>,
    /// Negative slot.
    pub negative: Option<SlotBinding>,
}

impl RoleSlots {
    /// Binds prompt actions to slots, first-registered wins per role.
    pub fn bind(actions: &[DialogActionView]) -> Self {
        let mut slots = Self::default();
        for (index, action) in actions.iter().enumerate() {
            let slot = slots.slot_mut(action.role);
            if slot.is_none() {
                *slot = Some(SlotBinding::Action(index));
            }
        }
        slots
    }

    /// Fills an empty negative slot with a dismiss button.
    pub fn with_dismiss_fallback(mut self, label: impl Into<String>) -> Self {
        if self.negative.is_none() {
            self.negative = Some(SlotBinding::Dismiss {
                label: label.into(),
            });
        }
        self
    }

    /// Returns the binding for `role`.
    pub fn slot(&self, role: DialogRole) -> Option<&SlotBinding> {
        match role {
            DialogRole::Affirmative => self.affirmative.as_ref(),
            DialogRole::Neutral => self.neutral.as_ref(),
            DialogRole::Negative => self.negative.as_ref(),
        }
    }

    fn slot_mut(&mut self, role: DialogRole) -> &mut Option<SlotBinding> {
        match role {
            DialogRole::Affirmative => &mut self.affirmative,
            DialogRole::Neutral => &mut self.neutral,
            DialogRole::Negative => &mut self.negative,
        }
    }

    /// Whether no slot is bound.
    pub fn is_empty(&self) -> bool {
        DialogRole::ALL.iter().all(|role| self.slot(*role).is_none())
    }

    /// Outcome reported when the user presses the slot for `role`.
    ///
    /// Pressing an empty slot or a dismiss button counts as a dismissal.
    pub fn outcome_for(&self, role: DialogRole) -> DialogOutcome {
        match self.slot(role) {
            Some(SlotBinding::Action(index)) => DialogOutcome::ActionInvoked(*index),
            Some(SlotBinding::Dismiss { .. }) | None => DialogOutcome::Canceled,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn view(label: &str, role: DialogRole) -> DialogActionView {
        DialogActionView {
            label: label.to_string(),
            role,
        }
    }

    #[test]
    fn first_registered_action_wins_each_role() {
        let slots = RoleSlots::bind(&[
            view("Yes", DialogRole::Affirmative),
            view("Sure", DialogRole::Affirmative),
            view("No", DialogRole::Negative),
        ]);

        assert_eq!(slots.affirmative, Some(SlotBinding::Action(0)));
        assert_eq!(slots.neutral, None);
        assert_eq!(slots.negative, Some(SlotBinding::Action(2)));
        assert_eq!(
            slots.outcome_for(DialogRole::Affirmative),
            DialogOutcome::ActionInvoked(0)
        );
        assert_eq!(slots.outcome_for(DialogRole::Neutral), DialogOutcome::Canceled);
    }

    #[test]
    fn dismiss_fallback_only_fills_an_empty_negative_slot() {
        let empty = RoleSlots::bind(&[]).with_dismiss_fallback(DEFAULT_DISMISS_LABEL);
        assert_eq!(
            empty.negative,
            Some(SlotBinding::Dismiss {
                label: "Close".to_string()
            })
        );
        assert_eq!(empty.outcome_for(DialogRole::Negative), DialogOutcome::Canceled);
        assert!(!empty.is_empty());

        let bound = RoleSlots::bind(&[view("Stop", DialogRole::Negative)])
            .with_dismiss_fallback(DEFAULT_DISMISS_LABEL);
        assert_eq!(bound.negative, Some(SlotBinding::Action(0)));
    }

    #[test]
    fn no_actions_means_no_slots() {
        assert!(RoleSlots::bind(&[]).is_empty());
    }
}
