#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl FormField {
    pub fn text(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub fn secret(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::text(label)
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// What the field shows on screen; secrets are starred out.
    pub fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// A stack of single-line text inputs with one focused field.
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = Form::new(vec![FormField::text("Title"), FormField::text("Content")]);
        form.push_char('a');
        form.next_field();
        form.push_char('b');
        form.push_char('c');
        form.backspace();

        assert_eq!(form.value(0), "a");
        assert_eq!(form.value(1), "b");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = Form::new(vec![FormField::text("a"), FormField::text("b")]);
        form.prev_field();
        assert_eq!(form.focus, 1);
        form.next_field();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn secrets_are_masked() {
        let field = FormField::secret("Password").with_value("hunter2");
        assert_eq!(field.display(), "*******");
        assert_eq!(field.value, "hunter2");
    }

    #[test]
    fn empty_form_ignores_input() {
        let mut form = Form::default();
        form.push_char('x');
        form.next_field();
        assert_eq!(form.value(0), "");
    }
}
