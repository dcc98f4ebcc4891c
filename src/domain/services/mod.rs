//! Domain services
//!
//! Prompt rendering, flow execution and the local workflow logic that does
//! not need the language model: reports, extraction runs and page links.

mod flow;
mod flows;
mod mock_extraction;
mod prompt_template;
mod report;
mod threat_link;

pub use flow::Flow;
pub use flows::{
    FlowCatalog, RECOVERY_POTENTIAL_FLOW, SIMULATE_RECOVERY_FLOW, THREAT_DETECTION_FLOW,
    WIPE_ACCURACY_FLOW,
};
pub use mock_extraction::{MOCK_EXTRACTED_DATA, MOCK_EXTRACTION_LOGS, extract};
pub use prompt_template::PromptTemplate;
pub use report::{
    DEFAULT_SNAPSHOT_CHARS, ForensicReport, UNKNOWN_FILE_NAME, content_digest, strip_extension,
};
pub use threat_link::{
    EXTRACTED_DATA_PARAM, LinkDecodeError, THREAT_DETECTION_ROUTE, decode_component,
    encode_component, threat_detection_link,
};
