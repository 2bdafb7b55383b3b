use thiserror::Error;

/// Why an enrollment photo was rejected. These are caller-facing
/// rejections, not faults; the messages phrase the fix.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnrollmentError {
    #[error("no face detected in photo")]
    NoFaceDetected,
    #[error("{count} faces detected, enrollment needs exactly one")]
    MultipleFacesDetected { count: usize },
}

/// Cardinality gate over the embeddings the vision pipeline extracted
/// from one enrollment photo: exactly one face is storable, ambiguity is
/// never auto-resolved. The accepted vector passes through unchanged.
pub fn validate_enrollment(mut candidates: Vec<Vec<f32>>) -> Result<Vec<f32>, EnrollmentError> {
    match candidates.len() {
        0 => Err(EnrollmentError::NoFaceDetected),
        1 => Ok(candidates.remove(0)),
        count => Err(EnrollmentError::MultipleFacesDetected { count }),
    }
}
