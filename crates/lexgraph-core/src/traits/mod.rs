mod embedding;
mod graph_store;
mod rerank_model;
mod retriever;
mod vector_store;

pub use embedding::IEmbeddingProvider;
pub use graph_store::IGraphStore;
pub use rerank_model::IRerankModel;
pub use retriever::IRetriever;
pub use vector_store::IVectorStore;
