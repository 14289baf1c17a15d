use api_types::CounterpartyKind;

/// Which UI surface hosts the form.
///
/// Modals close after a successful submit; pages reset for the next entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Modal,
    Page,
}

/// Strategy object describing one payment-form call site.
///
/// Replaces the four near-duplicate controllers with a single parametrized
/// implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormSite {
    pub kind: CounterpartyKind,
    pub surface: Surface,
    /// Whether this call site can post the payment to a bank/cash account.
    /// Sites without account support submit ledger-currency entries and
    /// omit the `account` field entirely.
    pub supports_account: bool,
}

impl FormSite {
    #[must_use]
    pub fn customer_modal() -> Self {
        Self {
            kind: CounterpartyKind::Customer,
            surface: Surface::Modal,
            supports_account: true,
        }
    }

    #[must_use]
    pub fn customer_page() -> Self {
        Self {
            kind: CounterpartyKind::Customer,
            surface: Surface::Page,
            supports_account: true,
        }
    }

    #[must_use]
    pub fn supplier_modal() -> Self {
        Self {
            kind: CounterpartyKind::Supplier,
            surface: Surface::Modal,
            supports_account: true,
        }
    }

    #[must_use]
    pub fn supplier_page() -> Self {
        Self {
            kind: CounterpartyKind::Supplier,
            surface: Surface::Page,
            supports_account: true,
        }
    }

    /// A site that only records ledger-currency entries.
    #[must_use]
    pub fn ledger_only(kind: CounterpartyKind, surface: Surface) -> Self {
        Self {
            kind,
            surface,
            supports_account: false,
        }
    }
}
