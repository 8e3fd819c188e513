mod candidate;
mod criteria;
mod entity_context;
mod filter;
mod graph;
mod report;
mod scored;
mod search_result;
mod vector;

pub use candidate::RetrievalCandidate;
pub use criteria::{EntityCriteria, EntityNeighbours, StatementSeed};
pub use entity_context::{EntityContext, EntityContexts};
pub use filter::MetadataFilter;
pub use graph::{Chunk, Entity, Fact, Source, Statement, TopicRef};
pub use report::{RetrievalReport, StrategyOutcome};
pub use scored::{ScoredEntity, ScoredStatement, SourceStatements};
pub use search_result::{RetrievalOutput, SearchResult, StatementResult, TopicResult};
pub use vector::{MatchedNode, VectorIndex, VectorMatch, VectorQuery};
