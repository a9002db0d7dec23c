#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Log a disassembly of every finished unit at debug level.
    pub trace_bytecode: bool,

    /// Extension required of source files passed to the file loader.
    pub source_extension: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            trace_bytecode: false,
            source_extension: "bas".to_string(),
        }
    }
}
