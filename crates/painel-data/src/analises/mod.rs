//! The five dashboard analyses, one per CSV subdirectory.

pub mod financeiro;
pub mod logistica;
pub mod marketing;
pub mod satisfacao;
pub mod vendas;

pub use financeiro::Financeiro;
pub use logistica::Logistica;
pub use marketing::Marketing;
pub use satisfacao::Satisfacao;
pub use vendas::Vendas;
