//! Supabase adapters

mod product_repository;

pub use product_repository::SupabaseProductRepository;
