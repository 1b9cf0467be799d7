/// Output buffer for markup generation
pub struct Context {
    buffer: String,
}

impl Context {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        self.add(text);
        self.add("\n");
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
