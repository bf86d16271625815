//! Dataset typing: column normalization, type classification, previews and schema hints.

mod classifier;
mod filename;
mod normalize;
mod preview;
mod schema;
mod types;

pub use classifier::{classify_by_columns, keywords, score_columns, TypeScore, MIN_CONFIDENT_SCORE};
pub use filename::classify_by_filename;
pub use normalize::{normalize, normalize_all};
pub use preview::{cell_to_value, DatasetPreview, PreviewRow, DEFAULT_PREVIEW_LIMIT};
pub use schema::{
    analyze_table, infer_dtype, missing_required_columns, required_columns, ColumnDtype,
    ColumnRole, ColumnSchema,
};
pub use types::{type_label, DatasetType};
