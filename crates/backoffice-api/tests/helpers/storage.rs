use async_trait::async_trait;
use backoffice_storage::{PresignedPut, PresignedPutRequest, StorageResult, UploadPresigner};
use std::sync::Mutex;

/// Presigner double that records every signing request
#[derive(Default)]
pub struct RecordingPresigner {
    calls: Mutex<Vec<PresignedPutRequest>>,
}

impl RecordingPresigner {
    pub fn calls(&self) -> Vec<PresignedPutRequest> {
        self.calls.lock().expect("presigner lock").clone()
    }
}

#[async_trait]
impl UploadPresigner for RecordingPresigner {
    async fn presign_put(&self, request: &PresignedPutRequest) -> StorageResult<PresignedPut> {
        self.calls
            .lock()
            .expect("presigner lock")
            .push(request.clone());
        Ok(PresignedPut {
            url: format!(
                "https://association-uploads.s3.eu-west-3.amazonaws.com/{}?X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Expires={}&X-Amz-SignedHeaders=content-length%3Bcontent-type%3Bhost%3Bx-amz-checksum-sha256&X-Amz-Signature=deadbeef",
                request.key,
                request.expires_in.as_secs()
            ),
            headers: vec![
                ("content-type".to_string(), request.content_type.clone()),
                (
                    "content-length".to_string(),
                    request.content_length.to_string(),
                ),
                (
                    "x-amz-checksum-sha256".to_string(),
                    request.checksum_sha256.clone(),
                ),
            ],
        })
    }

    fn bucket(&self) -> &str {
        "association-uploads"
    }
}
