mod clock;
mod error;
mod parser;
mod reader;
mod sample;

pub use clock::AccessClock;
pub use error::ReaderError;
pub use parser::{CsvParser, InputFormat, MonitorLogParser, SampleParser};
pub use reader::{LogText, Reader};
pub use sample::{Edge, PinLevel, Sample};
