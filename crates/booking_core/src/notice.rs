//! Transient user-facing notices. Every surfaced failure becomes exactly one.

use std::fmt;

use crate::{catalog::CatalogError, error::BookingError, session::AuthMode};

const GENERIC_TITLE: &str = "Erreur";
const GENERIC_DESCRIPTION: &str = "Une erreur est survenue, veuillez réessayer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: NoticeVariant,
}

/// Which view raised the error; the same failure reads differently in each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeContext {
    Listing,
    Detail,
    Booking,
    Auth,
}

impl Notice {
    fn info(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            variant: NoticeVariant::Info,
        }
    }

    fn destructive(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn payment_succeeded() -> Self {
        Self::info("Paiement réussi", "Votre réservation a été confirmée.")
    }

    pub fn signed_in(mode: AuthMode) -> Self {
        let title = match mode {
            AuthMode::Login => "Connexion réussie",
            AuthMode::SignUp => "Inscription réussie",
        };
        Self::info(title, "Bienvenue sur CinéApp")
    }

    /// `None` for cancelled work: a closed view has nowhere to show it.
    pub fn from_error(error: &BookingError, context: NoticeContext) -> Option<Self> {
        let notice = match error {
            BookingError::Cancelled => return None,
            BookingError::SeatSelectionRequired => Self::destructive(
                "Sélection requise",
                "Veuillez sélectionner au moins un siège.",
            ),
            BookingError::SeatOccupied(_) => Self::destructive(
                "Siège indisponible",
                "Ce siège est déjà occupé. Veuillez en choisir un autre.",
            ),
            BookingError::SnackSelectionRequired => Self::destructive(
                "Sélection requise",
                "Veuillez sélectionner une option de snack.",
            ),
            BookingError::MissingPaymentField(_) | BookingError::MissingAuthField(_) => {
                Self::destructive("Champs requis", "Veuillez remplir tous les champs.")
            }
            BookingError::Payment(_) => Self::destructive(
                "Erreur de paiement",
                "Le paiement a échoué. Veuillez réessayer.",
            ),
            BookingError::Catalog(CatalogError::NotFound(_)) => {
                Self::destructive(GENERIC_TITLE, "Ce film est introuvable.")
            }
            BookingError::Catalog(_) => match context {
                NoticeContext::Listing => Self::destructive(
                    GENERIC_TITLE,
                    "Impossible de charger les films. Veuillez réessayer.",
                ),
                _ => Self::destructive(
                    GENERIC_TITLE,
                    "Impossible de charger les détails du film. Veuillez réessayer.",
                ),
            },
            BookingError::Unauthenticated => {
                Self::destructive("Connexion requise", "Veuillez vous connecter pour continuer.")
            }
            BookingError::WrongStep { .. }
            | BookingError::ListingAlreadyRequested
            | BookingError::PaymentInProgress
            | BookingError::InvalidSeat(_)
            | BookingError::InvalidSnack(_)
            | BookingError::Session(_)
            | BookingError::MalformedSession(_) => {
                Self::destructive(GENERIC_TITLE, GENERIC_DESCRIPTION)
            }
        };
        Some(notice)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::MovieId;

    use super::*;
    use crate::payment::{PaymentError, PaymentField};

    #[test]
    fn empty_selection_reads_as_selection_required() {
        let notice = Notice::from_error(&BookingError::SeatSelectionRequired, NoticeContext::Booking)
            .expect("notice");
        assert_eq!(notice.title, "Sélection requise");
        assert_eq!(notice.description, "Veuillez sélectionner au moins un siège.");
        assert_eq!(notice.variant, NoticeVariant::Destructive);
    }

    #[test]
    fn payment_failure_and_success_have_distinct_copy() {
        let failed = Notice::from_error(
            &BookingError::Payment(PaymentError::Declined("insufficient funds".into())),
            NoticeContext::Booking,
        )
        .expect("notice");
        assert_eq!(failed.to_string(), "Erreur de paiement: Le paiement a échoué. Veuillez réessayer.");

        let paid = Notice::payment_succeeded();
        assert_eq!(paid.variant, NoticeVariant::Info);
        assert_eq!(paid.title, "Paiement réussi");
    }

    #[test]
    fn catalog_failure_copy_depends_on_the_view() {
        let error = BookingError::Catalog(CatalogError::Status {
            status: 500,
            message: "boom".into(),
        });
        let listing = Notice::from_error(&error, NoticeContext::Listing).expect("notice");
        let detail = Notice::from_error(&error, NoticeContext::Detail).expect("notice");
        assert!(listing.description.contains("les films"));
        assert!(detail.description.contains("détails du film"));

        let missing = Notice::from_error(
            &BookingError::Catalog(CatalogError::NotFound(MovieId(9))),
            NoticeContext::Detail,
        )
        .expect("notice");
        assert_eq!(missing.title, "Erreur");
    }

    #[test]
    fn taken_seat_asks_for_another() {
        let seat = "C4".parse().expect("seat");
        let notice = Notice::from_error(&BookingError::SeatOccupied(seat), NoticeContext::Booking)
            .expect("notice");
        assert_eq!(notice.title, "Siège indisponible");
    }

    #[test]
    fn cancelled_work_is_silent() {
        assert!(Notice::from_error(&BookingError::Cancelled, NoticeContext::Detail).is_none());
    }

    #[test]
    fn missing_fields_share_one_notice() {
        let payment = Notice::from_error(
            &BookingError::MissingPaymentField(PaymentField::Cvv),
            NoticeContext::Booking,
        );
        let auth = Notice::from_error(&BookingError::MissingAuthField("email"), NoticeContext::Auth);
        assert_eq!(payment, auth);
    }

    #[test]
    fn sign_up_and_login_greet_differently() {
        assert_eq!(Notice::signed_in(AuthMode::Login).title, "Connexion réussie");
        assert_eq!(Notice::signed_in(AuthMode::SignUp).title, "Inscription réussie");
        assert_eq!(Notice::signed_in(AuthMode::SignUp).description, "Bienvenue sur CinéApp");
    }
}
