pub mod claim_mapper;

pub use claim_mapper::ClaimMapper;
