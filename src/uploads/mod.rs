mod storage;

pub use storage::{
    PendingUpload, UPLOADS_URL_PREFIX, UploadError, UploadStorage, base_name, public_url, stored_name,
    stored_name_from_url,
};
