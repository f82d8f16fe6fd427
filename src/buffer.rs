use ropey::Rope;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum BufferError {
    Io(std::io::Error),
    Rope(ropey::Error),
    OutOfBounds { offset: usize, length: usize },
}

impl From<std::io::Error> for BufferError {
    fn from(err: std::io::Error) -> Self {
        BufferError::Io(err)
    }
}

impl From<ropey::Error> for BufferError {
    fn from(err: ropey::Error) -> Self {
        BufferError::Rope(err)
    }
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::Io(err) => write!(f, "IO error: {}", err),
            BufferError::Rope(err) => write!(f, "Rope error: {}", err),
            BufferError::OutOfBounds { offset, length } => {
                write!(f, "Range {}..{} out of bounds", offset, offset + length)
            }
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferError::Io(err) => Some(err),
            BufferError::Rope(err) => Some(err),
            BufferError::OutOfBounds { .. } => None,
        }
    }
}

/// Sequential text store commands borrow for the duration of one execution.
/// Offsets and lengths are in chars. `replace` is the only mutating entry
/// point a command uses, so a command that fails before its replace call
/// leaves the buffer untouched.
pub struct Buffer {
    pub rope: Rope,
    pub file_path: Option<String>,
    pub modified: bool,
    pub version: usize,
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::from(""),
            file_path: None,
            modified: false,
            version: 0,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            file_path: None,
            modified: false,
            version: 0,
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.modified = true;
        self.version += 1;
    }

    /// Read `length` chars starting at `offset`.
    pub fn read(&self, offset: usize, length: usize) -> Result<String, BufferError> {
        let end = offset + length;
        self.rope
            .get_slice(offset..end)
            .map(|slice| slice.to_string())
            .ok_or(BufferError::OutOfBounds { offset, length })
    }

    /// Replace `length` chars starting at `offset` with `text`, in one call.
    pub fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<(), BufferError> {
        let end = offset + length;
        if end > self.rope.len_chars() {
            return Err(BufferError::OutOfBounds { offset, length });
        }
        self.rope.try_remove(offset..end)?;
        self.rope.try_insert(offset, text)?;
        self.modified = true;
        self.version += 1;
        Ok(())
    }

    /// Line number containing the given char offset. Part of the shared
    /// adaptor contract; the sort command itself never needs it.
    pub fn line_of_offset(&self, offset: usize) -> Result<usize, BufferError> {
        Ok(self.rope.try_char_to_line(offset)?)
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx < self.rope.len_lines() {
            let line = self.rope.line(line_idx).to_string();
            if line.ends_with('\n') {
                Some(line.trim_end_matches('\n').to_string())
            } else {
                Some(line)
            }
        } else {
            None
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), BufferError> {
        let content = fs::read_to_string(path.as_ref())?;
        self.rope = Rope::from_str(&content);
        self.file_path = Some(path.as_ref().to_string_lossy().to_string());
        self.modified = false;
        self.version = 0;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), BufferError> {
        fs::write(path.as_ref(), self.rope.to_string())?;
        self.file_path = Some(path.as_ref().to_string_lossy().to_string());
        self.modified = false;
        Ok(())
    }
}

#[test]
fn test_read_range() {
    let buffer = Buffer::from_text("hello world");
    assert_eq!(buffer.read(0, 5).unwrap(), "hello");
    assert_eq!(buffer.read(6, 5).unwrap(), "world");
    assert!(buffer.read(6, 50).is_err());
}

#[test]
fn test_replace_range() {
    let mut buffer = Buffer::from_text("hello world");
    buffer.replace(0, 5, "goodbye").unwrap();
    assert_eq!(buffer.text(), "goodbye world");
    assert!(buffer.modified);
    assert_eq!(buffer.version, 1);
}

#[test]
fn test_replace_whole_content() {
    let mut buffer = Buffer::from_text("a\nb\nc");
    let len = buffer.len_chars();
    buffer.replace(0, len, "c\nb\na").unwrap();
    assert_eq!(buffer.text(), "c\nb\na");
}

#[test]
fn test_replace_out_of_bounds_leaves_buffer_alone() {
    let mut buffer = Buffer::from_text("abc");
    assert!(buffer.replace(0, 10, "xyz").is_err());
    assert_eq!(buffer.text(), "abc");
    assert!(!buffer.modified);
}

#[test]
fn test_line_of_offset() {
    let buffer = Buffer::from_text("a\nbb\nccc");
    assert_eq!(buffer.line_of_offset(0).unwrap(), 0);
    assert_eq!(buffer.line_of_offset(3).unwrap(), 1);
    assert_eq!(buffer.line_of_offset(5).unwrap(), 2);
}

#[test]
fn test_load_and_save() {
    use tempfile::NamedTempFile;
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(temp_file.path(), "hello\nworld").unwrap();

    let mut buffer = Buffer::new();
    buffer.load_from_file(temp_file.path()).unwrap();
    assert_eq!(buffer.line_count(), 2);
    assert_eq!(buffer.line(0).unwrap(), "hello");
    assert_eq!(buffer.line(1).unwrap(), "world");

    let save_file = NamedTempFile::new().unwrap();
    buffer.save_to_file(save_file.path()).unwrap();
    let content = fs::read_to_string(save_file.path()).unwrap();
    assert_eq!(content, "hello\nworld");
}
