//! Upload size limits.
//!
//! The ceiling applies to the file content. The request body may exceed it
//! by the multipart framing slack; anything beyond that is rejected before
//! it is buffered.

/// Room for multipart boundaries, part headers and small extra fields.
pub const MULTIPART_SLACK_BYTES: usize = 64 * 1024;

/// Size limits for one document submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    max_file_bytes: usize,
}

impl UploadLimits {
    pub fn new(max_file_bytes: usize) -> Self {
        Self { max_file_bytes }
    }

    /// Largest accepted file content.
    pub fn max_file_bytes(&self) -> usize {
        self.max_file_bytes
    }

    /// Largest accepted request body.
    pub fn max_body_bytes(&self) -> usize {
        self.max_file_bytes.saturating_add(MULTIPART_SLACK_BYTES)
    }

    /// Whether a declared Content-Length already rules the request out.
    pub fn rejects_declared_length(&self, content_length: Option<u64>) -> bool {
        content_length.is_some_and(|len| len > self.max_body_bytes() as u64)
    }

    /// Whether a fully read file is over the ceiling.
    pub fn rejects_file(&self, len: usize) -> bool {
        len > self.max_file_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MIB: usize = 10 * 1024 * 1024;

    #[test]
    fn file_ceiling_is_inclusive() {
        let limits = UploadLimits::new(TEN_MIB);
        assert!(!limits.rejects_file(TEN_MIB));
        assert!(limits.rejects_file(TEN_MIB + 1));
    }

    #[test]
    fn declared_length_allows_framing_slack() {
        let limits = UploadLimits::new(TEN_MIB);
        assert!(!limits.rejects_declared_length(None));
        assert!(!limits.rejects_declared_length(Some((TEN_MIB + 1000) as u64)));
        assert!(limits.rejects_declared_length(Some((TEN_MIB + MULTIPART_SLACK_BYTES + 1) as u64)));
    }
}
