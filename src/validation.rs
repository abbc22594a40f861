use std::error::Error as StdError;

/// Error reporter is any object that can be used to collect errors during validation by
/// the [`Validation`] trait.
///
/// In most cases, users will just call [`Validation::validate`], which uses the default
/// [`VecReporter`] without caring too much about the underlying implementation.
pub trait ErrorReporter<E: StdError>: Sized {
    /// Report an error into this [`ErrorReporter`].
    fn report<E2: Into<E>>(&mut self, error: E2);
}

/// A simple [`ErrorReporter`] implementation that collects all errors into a vector.
pub struct VecReporter<E: StdError> {
    errors: Vec<E>,
}

impl<E: StdError> ErrorReporter<E> for VecReporter<E> {
    fn report<X: Into<E>>(&mut self, error: X) {
        self.errors.push(error.into());
    }
}

/// Validation trait is implemented by objects whose structural invariants can be checked.
///
/// Compared to `TryFrom`, validation does not terminate when the first error is found.
/// Instead, it collects all errors into the provided [`ErrorReporter`], so that a single
/// pass over a network lists every inconsistency.
pub trait Validation {
    type Error: StdError;

    fn validate_all<R: ErrorReporter<Self::Error>>(&self, reporter: &mut R);

    fn validate(&self) -> Result<(), Vec<Self::Error>> {
        let mut reporter = VecReporter { errors: vec![] };
        self.validate_all(&mut reporter);
        if reporter.errors.is_empty() {
            Ok(())
        } else {
            Err(reporter.errors)
        }
    }
}
