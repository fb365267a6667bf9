//! Parser for the literals carried in block headers.
//!
//! Headers use a small Python-flavoured subset: quoted strings, lists and
//! dicts with string keys, e.g. `{'NAME': ['sum', 'mean']}` or
//! `[['float64', 'intp'], ['float32', 'intp']]`.

/// A parsed header literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    List(Vec<Literal>),
    /// Entries in declaration order.
    Dict(Vec<(String, Literal)>),
}

impl Literal {
    /// Parse a complete literal; trailing non-whitespace input is an error.
    pub fn parse(input: &str) -> Result<Literal, String> {
        let mut parser = Parser { chars: input.chars().collect(), pos: 0 };
        let value = parser.value()?;
        parser.skip_ws();
        if parser.pos < parser.chars.len() {
            return Err(format!("unexpected trailing input at offset {}", parser.pos));
        }
        Ok(value)
    }

    /// Interpret the literal as a flat list of strings.
    pub fn into_string_list(self) -> Result<Vec<String>, String> {
        match self {
            Literal::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Literal::Str(s) => Ok(s),
                    other => Err(format!("expected a string, found {}", other.kind())),
                })
                .collect(),
            other => Err(format!("expected a list of strings, found {}", other.kind())),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::List(_) => "list",
            Literal::Dict(_) => "dict",
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn value(&mut self) -> Result<Literal, String> {
        self.skip_ws();
        match self.peek() {
            Some('\'') | Some('"') => self.string().map(Literal::Str),
            Some('[') => self.list(),
            Some('{') => self.dict(),
            Some(c) => Err(format!("unexpected character `{c}` at offset {}", self.pos)),
            None => Err("unexpected end of literal".to_string()),
        }
    }

    fn string(&mut self) -> Result<String, String> {
        let start = self.pos;
        let quote = self.bump().ok_or("unexpected end of literal")?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(format!("unterminated string starting at offset {start}")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c @ ('\\' | '\'' | '"')) => out.push(c),
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    }
                    None => {
                        return Err(format!("unterminated string starting at offset {start}"))
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn list(&mut self) -> Result<Literal, String> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(']') {
                self.bump();
                return Ok(Literal::List(items));
            }
            items.push(self.value()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(Literal::List(items)),
                Some(c) => {
                    return Err(format!("expected `,` or `]` but found `{c}` at offset {}", self.pos - 1))
                }
                None => return Err("unterminated list".to_string()),
            }
        }
    }

    fn dict(&mut self) -> Result<Literal, String> {
        self.bump();
        let mut entries: Vec<(String, Literal)> = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Literal::Dict(entries));
            }
            let key = match self.value()? {
                Literal::Str(s) => s,
                other => return Err(format!("dict keys must be strings, found {}", other.kind())),
            };
            self.skip_ws();
            if self.bump() != Some(':') {
                return Err(format!("expected `:` after key `{key}`"));
            }
            let value = self.value()?;
            // Later duplicates win, like a Python dict literal.
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Literal::Dict(entries)),
                Some(c) => {
                    return Err(format!("expected `,` or `}}` but found `{c}` at offset {}", self.pos - 1))
                }
                None => return Err("unterminated dict".to_string()),
            }
        }
    }
}
