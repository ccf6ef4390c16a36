use thiserror::Error;

/// Rejected configuration values. Raised before any data is touched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("significance level index {0} is out of range (expected 0..=5)")]
    InvalidSignificanceIndex(usize),

    #[error("unknown significance level {0}")]
    UnknownSignificanceLevel(String),

    #[error("unknown impurity measure '{0}' (expected 'entropy' or 'gini')")]
    UnknownImpurity(String),

    #[error("positive class '{label}' is not a value of class attribute '{attribute}'")]
    UnknownPositiveClass { label: String, attribute: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Problems with the data handed to the learner or read from a file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("value '{value}' is not in the domain of attribute '{attribute}'")]
    ValueOutOfDomain { attribute: String, value: String },

    #[error("value index {index} is outside the {cardinality}-value domain of '{attribute}'")]
    IndexOutOfDomain {
        attribute: String,
        index: usize,
        cardinality: usize,
    },

    #[error("class attribute '{attribute}' has {values} values, exactly 2 are required")]
    NonBinaryClass { attribute: String, values: usize },

    #[error("attribute index {index} is out of range ({count} attributes)")]
    AttributeOutOfRange { index: usize, count: usize },

    #[error("row {row} is out of range ({len} instances)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("attribute '{0}' is not nominal")]
    UnsupportedAttribute(String),

    #[error("missing value for attribute '{0}'")]
    MissingValue(String),

    #[error("instance has {got} values, header declares {expected}")]
    SchemaMismatch { expected: usize, got: usize },

    #[error("{0} does not share the schema of the training data")]
    IncompatibleHeader(String),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<DataError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures of tree induction and inference.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("degrees of freedom {0} fall outside the critical value table (1..=13)")]
    DegreesOfFreedomOutOfRange(usize),

    #[error("the tree has not been built yet")]
    NotBuilt,
}
