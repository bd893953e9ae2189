// Service exports
pub mod cache;
pub mod embedding;
pub mod supabase;

pub use cache::CachedEncoder;
pub use embedding::{EmbeddingError, MiniLmEncoder, TextEncoder, EMBEDDING_DIMENSION};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
