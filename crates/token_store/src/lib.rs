mod error;
mod paths;
mod schema;
mod store;

pub use error::TokenStoreError;
pub use paths::{token_file_path, token_root, TOKEN_DIR, TOKEN_KEY};
pub use schema::TokenRecord;
pub use store::TokenStore;
