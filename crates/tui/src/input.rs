/// Single-line text buffer behind every form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    secret: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input whose contents are masked when drawn.
    pub fn secret() -> Self {
        Self {
            buffer: String::new(),
            secret: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    pub fn handle_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn handle_backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn display(&self) -> String {
        mask(&self.buffer, self.secret)
    }
}

pub fn mask(value: &str, secret: bool) -> String {
    if secret {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    }
}
