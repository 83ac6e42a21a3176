use crate::types::ErrorVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

/// Outcome of a check that reports every broken rule, not just the first.
///
/// A checkout form should tell the buyer that both the phone number and the
/// postal code are wrong in one round trip; `Validation` carries either the
/// checked value or all collected errors.
///
/// ```
/// use retry_rail::validation::{is_postal_code, Validation};
///
/// fn postal(code: &str) -> Validation<&'static str, String> {
///     if is_postal_code(code) {
///         Validation::valid(code.to_owned())
///     } else {
///         Validation::invalid("postal code must be 10 digits")
///     }
/// }
///
/// assert!(postal("1234567890").is_valid());
/// assert!(postal("12-34").is_invalid());
/// ```
#[must_use]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Validation<E, A> {
    Valid(A),
    Invalid(ErrorVec<E>),
}

impl<E, A> Validation<E, A> {
    #[inline]
    pub fn valid(value: A) -> Self {
        Self::Valid(value)
    }

    #[inline]
    pub fn invalid(error: E) -> Self {
        Self::Invalid(smallvec![error])
    }

    /// `Invalid` holding every error of `errors`, even when there are none.
    #[inline]
    pub fn invalid_many<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        Self::Invalid(errors.into_iter().collect())
    }

    /// `Valid(value)` if `errors` turns out empty.
    ///
    /// ```
    /// use retry_rail::validation::Validation;
    ///
    /// assert!(Validation::<&str, _>::from_errors(Vec::new(), ()).is_valid());
    /// assert!(Validation::from_errors(vec!["too short"], ()).is_invalid());
    /// ```
    pub fn from_errors<I>(errors: I, value: A) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let errors: ErrorVec<E> = errors.into_iter().collect();
        if errors.is_empty() {
            Self::Valid(value)
        } else {
            Self::Invalid(errors)
        }
    }

    #[must_use]
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    #[inline]
    pub fn map<B, F>(self, f: F) -> Validation<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Valid(value) => Validation::Valid(f(value)),
            Self::Invalid(errors) => Validation::Invalid(errors),
        }
    }

    /// Pairs two checked values; when either side failed, the errors of both
    /// sides are kept, left first.
    ///
    /// ```
    /// use retry_rail::validation::Validation;
    ///
    /// let phone = Validation::<&str, u64>::invalid("phone");
    /// let email = Validation::<&str, String>::invalid("email");
    /// assert_eq!(phone.zip(email).into_errors().unwrap().as_slice(), &["phone", "email"]);
    /// ```
    #[inline]
    pub fn zip<B>(self, other: Validation<E, B>) -> Validation<E, (A, B)> {
        match (self, other) {
            (Validation::Valid(a), Validation::Valid(b)) => Validation::Valid((a, b)),
            (Validation::Invalid(mut left), Validation::Invalid(right)) => {
                left.extend(right);
                Validation::Invalid(left)
            }
            (Validation::Invalid(errors), _) | (_, Validation::Invalid(errors)) => {
                Validation::Invalid(errors)
            }
        }
    }

    #[inline]
    pub fn map_err<F, G>(self, f: F) -> Validation<G, A>
    where
        F: FnMut(E) -> G,
    {
        match self {
            Self::Valid(value) => Validation::Valid(value),
            Self::Invalid(errors) => Validation::Invalid(errors.into_iter().map(f).collect()),
        }
    }

    #[inline]
    pub fn into_result(self) -> Result<A, ErrorVec<E>> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(errors) => Err(errors),
        }
    }

    #[must_use]
    #[inline]
    pub fn into_errors(self) -> Option<ErrorVec<E>> {
        self.into_result().err()
    }

    #[must_use]
    #[inline]
    pub fn into_value(self) -> Option<A> {
        self.into_result().ok()
    }

    pub fn iter_errors(&self) -> impl Iterator<Item = &E> {
        let errors: &[E] = match self {
            Self::Valid(_) => &[],
            Self::Invalid(errors) => errors,
        };
        errors.iter()
    }
}

impl<E, A> From<Result<A, E>> for Validation<E, A> {
    fn from(result: Result<A, E>) -> Self {
        result.map_or_else(Self::invalid, Self::valid)
    }
}

/// Checks a whole form at once: valid values are collected, and every error
/// of every invalid field is kept.
///
/// ```
/// use retry_rail::validation::Validation;
///
/// let fields = vec![
///     Validation::<&str, u32>::valid(1),
///     Validation::invalid("postal code"),
///     Validation::invalid("phone"),
/// ];
/// let form: Validation<&str, Vec<u32>> = fields.into_iter().collect();
/// assert_eq!(form.into_errors().unwrap().as_slice(), &["postal code", "phone"]);
/// ```
impl<E, A, C> FromIterator<Validation<E, A>> for Validation<E, C>
where
    C: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Validation<E, A>>>(iter: I) -> Self {
        let mut values = Vec::new();
        let mut errors = ErrorVec::new();
        for field in iter {
            match field {
                Validation::Valid(value) => values.push(value),
                Validation::Invalid(field_errors) => errors.extend(field_errors),
            }
        }
        Validation::from_errors(errors, ())
            .map(|()| values.into_iter().collect())
    }
}
