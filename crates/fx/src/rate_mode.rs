/// State of a rate field: auto-resolved from the catalog, or manually
/// overridden by the user.
///
/// This is a two-state machine gated by explicit events rather than an
/// incidental boolean: the manual override survives amount edits and is
/// invalidated only when the cross-currency pair itself changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RateMode {
    #[default]
    Auto,
    Manual,
}

/// Events that may move a rate field between [`RateMode`] states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateEvent {
    /// The user typed directly into the rate field.
    RateEdited,
    /// The settlement account selection changed (including being cleared).
    AccountChanged,
    /// The payment currency changed.
    CurrencyChanged,
    /// The amount changed. Never affects the mode, including when the
    /// amount is cleared to empty.
    AmountChanged,
}

impl RateMode {
    /// Transition table for the rate-field state machine.
    #[must_use]
    pub fn apply(self, event: RateEvent) -> RateMode {
        match event {
            RateEvent::RateEdited => RateMode::Manual,
            RateEvent::AccountChanged | RateEvent::CurrencyChanged => RateMode::Auto,
            RateEvent::AmountChanged => self,
        }
    }

    /// `true` when the catalog may overwrite the field.
    #[must_use]
    pub fn allows_auto_update(self) -> bool {
        self == RateMode::Auto
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_edit_enters_manual() {
        assert_eq!(RateMode::Auto.apply(RateEvent::RateEdited), RateMode::Manual);
        assert_eq!(RateMode::Manual.apply(RateEvent::RateEdited), RateMode::Manual);
    }

    #[test]
    fn pair_changes_reset_to_auto() {
        assert_eq!(RateMode::Manual.apply(RateEvent::AccountChanged), RateMode::Auto);
        assert_eq!(RateMode::Manual.apply(RateEvent::CurrencyChanged), RateMode::Auto);
    }

    #[test]
    fn amount_changes_never_touch_the_mode() {
        assert_eq!(RateMode::Manual.apply(RateEvent::AmountChanged), RateMode::Manual);
        assert_eq!(RateMode::Auto.apply(RateEvent::AmountChanged), RateMode::Auto);
    }
}
