// ==========================================
// 设备绩效指标引擎 - 导入层
// ==========================================
// 职责: 从 CSV / Excel 导入日运行记录
// ==========================================

pub mod error;
pub mod file_parser;
pub mod observation_importer;

pub use error::{ImportError, ImportResult};
pub use file_parser::{parser_for, CsvParser, ExcelParser, FileParser, ParsedSheet, RawRow};
pub use observation_importer::{ImportReport, ObservationImporter, RejectedRow};
