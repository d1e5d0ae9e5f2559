use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::syntax_kind::SyntaxKind;
use crate::TextRange;

/// A lexed token.
///
/// `contextual_kind` carries the keyword a plain identifier may act as
/// (`closed`, `partial`, `record`, ...). For every other token it equals `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub contextual_kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    pub(crate) fn new(kind: SyntaxKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            contextual_kind: kind,
            range: TextRange::new(start, end),
        }
    }

    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.range.start as usize..self.range.end as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub code: ErrorCode,
    pub range: TextRange,
}

impl LexError {
    pub fn to_diagnostic(&self, input: &str) -> Diagnostic {
        match self.code {
            ErrorCode::UnexpectedCharacter => {
                let text = &input[self.range.start as usize..self.range.end as usize];
                Diagnostic::with_args(self.code, self.range, [text])
            }
            code => Diagnostic::new(code, self.range),
        }
    }
}

/// Lex the whole input, including trivia, ending with an `EndOfFileToken`.
pub fn lex(input: &str) -> Vec<Token> {
    lex_with_errors(input).0
}

pub fn lex_with_errors(input: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == SyntaxKind::EndOfFileToken;
        tokens.push(token);
        if done {
            break;
        }
    }
    (tokens, lexer.errors)
}

pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Only whitespace seen since the last line break (preprocessor directives).
    at_line_start: bool,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            at_line_start: true,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn next_token(&mut self) -> Token {
        let start = self.pos;
        let Some(c) = self.peek_char() else {
            return Token::new(SyntaxKind::EndOfFileToken, start, start);
        };

        if is_newline(c) {
            if c == '\r' && self.peek_byte_at(1) == Some(b'\n') {
                self.pos += 2;
            } else {
                self.pos += c.len_utf8();
            }
            self.at_line_start = true;
            return Token::new(SyntaxKind::EndOfLineTrivia, start, self.pos);
        }

        if c.is_whitespace() {
            while let Some(c) = self.peek_char() {
                if !c.is_whitespace() || is_newline(c) {
                    break;
                }
                self.pos += c.len_utf8();
            }
            return Token::new(SyntaxKind::WhitespaceTrivia, start, self.pos);
        }

        let line_start = std::mem::replace(&mut self.at_line_start, false);

        if c == '#' && line_start {
            self.eat_to_line_end();
            return Token::new(SyntaxKind::PreprocessorDirectiveTrivia, start, self.pos);
        }

        if c == '/' {
            match self.peek_byte_at(1) {
                Some(b'/') => {
                    let doc = self.peek_byte_at(2) == Some(b'/') && self.peek_byte_at(3) != Some(b'/');
                    self.eat_to_line_end();
                    let kind = if doc {
                        SyntaxKind::SingleLineDocumentationCommentTrivia
                    } else {
                        SyntaxKind::SingleLineCommentTrivia
                    };
                    self.at_line_start = line_start;
                    return Token::new(kind, start, self.pos);
                }
                Some(b'*') => {
                    self.pos += 2;
                    match self.input[self.pos..].find("*/") {
                        Some(offset) => self.pos += offset + 2,
                        None => {
                            self.pos = self.input.len();
                            self.error(ErrorCode::OpenEndedComment, start, start + 2);
                        }
                    }
                    return Token::new(SyntaxKind::MultiLineCommentTrivia, start, self.pos);
                }
                _ => {}
            }
        }

        if c == '@' {
            match self.peek_byte_at(1) {
                Some(b'"') => {
                    self.pos += 1;
                    return self.lex_verbatim_string(start);
                }
                Some(b'$') if self.peek_byte_at(2) == Some(b'"') => {
                    self.pos += 2;
                    return self.lex_interpolated_string(start, true);
                }
                _ => {}
            }
            if let Some(next) = self.input[self.pos + 1..].chars().next() {
                if is_ident_start(next) {
                    self.pos += 1;
                    self.eat_ident_rest();
                    return Token::new(SyntaxKind::IdentifierToken, start, self.pos);
                }
            }
        }

        if c == '$' {
            let mut idx = 1;
            while self.peek_byte_at(idx) == Some(b'$') {
                idx += 1;
            }
            match self.peek_byte_at(idx) {
                Some(b'"') if self.input[self.pos + idx..].starts_with("\"\"\"") => {
                    self.pos += idx;
                    return self.lex_raw_string(start, SyntaxKind::InterpolatedStringToken);
                }
                Some(b'"') if idx == 1 => {
                    self.pos += 1;
                    return self.lex_interpolated_string(start, false);
                }
                Some(b'@') if idx == 1 && self.peek_byte_at(2) == Some(b'"') => {
                    self.pos += 2;
                    return self.lex_interpolated_string(start, true);
                }
                _ => {}
            }
        }

        if is_ident_start(c) {
            self.eat_ident_rest();
            let text = &self.input[start..self.pos];
            if let Some(kind) = SyntaxKind::from_keyword(text) {
                return Token::new(kind, start, self.pos);
            }
            let contextual_kind =
                SyntaxKind::from_contextual_keyword(text).unwrap_or(SyntaxKind::IdentifierToken);
            return Token {
                kind: SyntaxKind::IdentifierToken,
                contextual_kind,
                range: TextRange::new(start, self.pos),
            };
        }

        if c.is_ascii_digit()
            || (c == '.' && self.peek_byte_at(1).map_or(false, |b| b.is_ascii_digit()))
        {
            return self.lex_number(start);
        }

        if c == '"' {
            if self.input[self.pos..].starts_with("\"\"\"") {
                return self.lex_raw_string(start, SyntaxKind::StringLiteralToken);
            }
            return self.lex_string(start);
        }

        if c == '\'' {
            return self.lex_char(start);
        }

        if let Some((kind, len)) = self.punctuation() {
            self.pos += len;
            return Token::new(kind, start, self.pos);
        }

        self.pos += c.len_utf8();
        self.error(ErrorCode::UnexpectedCharacter, start, self.pos);
        Token::new(SyntaxKind::BadToken, start, self.pos)
    }

    fn lex_number(&mut self, start: usize) -> Token {
        let radix_prefix = self.peek_byte() == Some(b'0')
            && matches!(self.peek_byte_at(1), Some(b'x' | b'X' | b'b' | b'B'));
        if radix_prefix {
            let hex = matches!(self.peek_byte_at(1), Some(b'x' | b'X'));
            self.pos += 2;
            while let Some(b) = self.peek_byte() {
                let ok = b == b'_'
                    || if hex {
                        b.is_ascii_hexdigit()
                    } else {
                        b == b'0' || b == b'1'
                    };
                if !ok {
                    break;
                }
                self.pos += 1;
            }
            self.eat_integer_suffix();
            return Token::new(SyntaxKind::NumericLiteralToken, start, self.pos);
        }

        self.eat_digits();
        let mut real = false;
        if self.peek_byte() == Some(b'.') && self.peek_byte_at(1).map_or(false, |b| b.is_ascii_digit())
        {
            self.pos += 1;
            self.eat_digits();
            real = true;
        }
        if matches!(self.peek_byte(), Some(b'e' | b'E')) {
            let mut idx = 1;
            if matches!(self.peek_byte_at(1), Some(b'+' | b'-')) {
                idx = 2;
            }
            if self.peek_byte_at(idx).map_or(false, |b| b.is_ascii_digit()) {
                self.pos += idx;
                self.eat_digits();
                real = true;
            }
        }
        match self.peek_byte() {
            Some(b'f' | b'F' | b'd' | b'D' | b'm' | b'M') => self.pos += 1,
            _ if !real => self.eat_integer_suffix(),
            _ => {}
        }
        Token::new(SyntaxKind::NumericLiteralToken, start, self.pos)
    }

    fn eat_digits(&mut self) {
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit() || b == b'_') {
            self.pos += 1;
        }
    }

    fn eat_integer_suffix(&mut self) {
        match self.peek_byte() {
            Some(b'u' | b'U') => {
                self.pos += 1;
                if matches!(self.peek_byte(), Some(b'l' | b'L')) {
                    self.pos += 1;
                }
            }
            Some(b'l' | b'L') => {
                self.pos += 1;
                if matches!(self.peek_byte(), Some(b'u' | b'U')) {
                    self.pos += 1;
                }
            }
            _ => {}
        }
    }

    fn lex_string(&mut self, start: usize) -> Token {
        self.pos += 1;
        loop {
            match self.peek_char() {
                None => {
                    self.error(ErrorCode::NewlineInConst, start, self.pos);
                    break;
                }
                Some(c) if is_newline(c) => {
                    self.error(ErrorCode::NewlineInConst, start, self.pos);
                    break;
                }
                Some('"') => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => {
                    self.pos += 1;
                    if let Some(c) = self.peek_char() {
                        if !is_newline(c) {
                            self.pos += c.len_utf8();
                        }
                    }
                }
                Some(c) => self.pos += c.len_utf8(),
            }
        }
        Token::new(SyntaxKind::StringLiteralToken, start, self.pos)
    }

    fn lex_verbatim_string(&mut self, start: usize) -> Token {
        // `pos` is at the opening quote.
        self.pos += 1;
        loop {
            match self.peek_char() {
                None => {
                    self.error(ErrorCode::UnterminatedStringLit, start, self.pos);
                    break;
                }
                Some('"') if self.peek_byte_at(1) == Some(b'"') => self.pos += 2,
                Some('"') => {
                    self.pos += 1;
                    break;
                }
                Some(c) => self.pos += c.len_utf8(),
            }
        }
        Token::new(SyntaxKind::StringLiteralToken, start, self.pos)
    }

    fn lex_raw_string(&mut self, start: usize, kind: SyntaxKind) -> Token {
        let mut quotes = 0usize;
        while self.peek_byte() == Some(b'"') {
            quotes += 1;
            self.pos += 1;
        }
        let delimiter = "\"".repeat(quotes);
        match self.input[self.pos..].find(delimiter.as_str()) {
            Some(offset) => {
                self.pos += offset;
                while self.peek_byte() == Some(b'"') {
                    self.pos += 1;
                }
            }
            None => {
                self.pos = self.input.len();
                self.error(ErrorCode::UnterminatedStringLit, start, self.pos);
            }
        }
        Token::new(kind, start, self.pos)
    }

    fn lex_interpolated_string(&mut self, start: usize, verbatim: bool) -> Token {
        // `pos` is at the opening quote.
        self.pos += 1;
        let mut depth = 0usize;
        loop {
            let Some(c) = self.peek_char() else {
                self.error(ErrorCode::UnterminatedStringLit, start, self.pos);
                break;
            };
            if depth > 0 {
                match c {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    '"' => {
                        let nested = self.pos;
                        self.lex_string(nested);
                        continue;
                    }
                    '\'' => {
                        let nested = self.pos;
                        self.lex_char(nested);
                        continue;
                    }
                    _ => {}
                }
                self.pos += c.len_utf8();
                continue;
            }
            match c {
                '{' if self.peek_byte_at(1) == Some(b'{') => self.pos += 2,
                '}' if self.peek_byte_at(1) == Some(b'}') => self.pos += 2,
                '{' => {
                    depth = 1;
                    self.pos += 1;
                }
                '"' if verbatim && self.peek_byte_at(1) == Some(b'"') => self.pos += 2,
                '"' => {
                    self.pos += 1;
                    break;
                }
                '\\' if !verbatim => {
                    self.pos += 1;
                    if let Some(c) = self.peek_char() {
                        if !is_newline(c) {
                            self.pos += c.len_utf8();
                        }
                    }
                }
                c if is_newline(c) && !verbatim => {
                    self.error(ErrorCode::NewlineInConst, start, self.pos);
                    break;
                }
                c => self.pos += c.len_utf8(),
            }
        }
        Token::new(SyntaxKind::InterpolatedStringToken, start, self.pos)
    }

    fn lex_char(&mut self, start: usize) -> Token {
        self.pos += 1;
        let mut len = 0usize;
        loop {
            match self.peek_char() {
                None => {
                    self.error(ErrorCode::NewlineInConst, start, self.pos);
                    break;
                }
                Some(c) if is_newline(c) => {
                    self.error(ErrorCode::NewlineInConst, start, self.pos);
                    break;
                }
                Some('\'') => {
                    self.pos += 1;
                    if len == 0 {
                        self.error(ErrorCode::EmptyCharConst, start, self.pos);
                    }
                    break;
                }
                Some('\\') => {
                    self.pos += 1;
                    len += 1;
                    if let Some(c) = self.peek_char() {
                        if !is_newline(c) {
                            self.pos += c.len_utf8();
                        }
                    }
                }
                Some(c) => {
                    len += 1;
                    self.pos += c.len_utf8();
                }
            }
        }
        Token::new(SyntaxKind::CharacterLiteralToken, start, self.pos)
    }

    fn punctuation(&self) -> Option<(SyntaxKind, usize)> {
        const TABLE: &[(&str, SyntaxKind)] = &[
            (">>>=", SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
            (">>>", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
            ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
            (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
            ("??=", SyntaxKind::QuestionQuestionEqualsToken),
            ("||", SyntaxKind::BarBarToken),
            ("&&", SyntaxKind::AmpersandAmpersandToken),
            ("--", SyntaxKind::MinusMinusToken),
            ("++", SyntaxKind::PlusPlusToken),
            ("::", SyntaxKind::ColonColonToken),
            ("??", SyntaxKind::QuestionQuestionToken),
            ("->", SyntaxKind::MinusGreaterThanToken),
            ("!=", SyntaxKind::ExclamationEqualsToken),
            ("==", SyntaxKind::EqualsEqualsToken),
            ("=>", SyntaxKind::EqualsGreaterThanToken),
            ("<=", SyntaxKind::LessThanEqualsToken),
            ("<<", SyntaxKind::LessThanLessThanToken),
            (">=", SyntaxKind::GreaterThanEqualsToken),
            (">>", SyntaxKind::GreaterThanGreaterThanToken),
            ("/=", SyntaxKind::SlashEqualsToken),
            ("*=", SyntaxKind::AsteriskEqualsToken),
            ("|=", SyntaxKind::BarEqualsToken),
            ("&=", SyntaxKind::AmpersandEqualsToken),
            ("+=", SyntaxKind::PlusEqualsToken),
            ("-=", SyntaxKind::MinusEqualsToken),
            ("^=", SyntaxKind::CaretEqualsToken),
            ("%=", SyntaxKind::PercentEqualsToken),
            ("..", SyntaxKind::DotDotToken),
            ("~", SyntaxKind::TildeToken),
            ("!", SyntaxKind::ExclamationToken),
            ("%", SyntaxKind::PercentToken),
            ("^", SyntaxKind::CaretToken),
            ("&", SyntaxKind::AmpersandToken),
            ("*", SyntaxKind::AsteriskToken),
            ("(", SyntaxKind::OpenParenToken),
            (")", SyntaxKind::CloseParenToken),
            ("-", SyntaxKind::MinusToken),
            ("+", SyntaxKind::PlusToken),
            ("=", SyntaxKind::EqualsToken),
            ("{", SyntaxKind::OpenBraceToken),
            ("}", SyntaxKind::CloseBraceToken),
            ("[", SyntaxKind::OpenBracketToken),
            ("]", SyntaxKind::CloseBracketToken),
            ("|", SyntaxKind::BarToken),
            (":", SyntaxKind::ColonToken),
            (";", SyntaxKind::SemicolonToken),
            ("<", SyntaxKind::LessThanToken),
            (",", SyntaxKind::CommaToken),
            (">", SyntaxKind::GreaterThanToken),
            (".", SyntaxKind::DotToken),
            ("?", SyntaxKind::QuestionToken),
            ("/", SyntaxKind::SlashToken),
        ];

        let rest = &self.input[self.pos..];
        TABLE
            .iter()
            .find(|(text, _)| rest.starts_with(text))
            .map(|(text, kind)| (*kind, text.len()))
    }

    fn eat_ident_rest(&mut self) {
        while let Some(c) = self.peek_char() {
            if !is_ident_continue(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat_to_line_end(&mut self) {
        while let Some(c) = self.peek_char() {
            if is_newline(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn error(&mut self, code: ErrorCode, start: usize, end: usize) {
        self.errors.push(LexError {
            code,
            range: TextRange::new(start, end),
        });
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_byte_at(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.pos + n).copied()
    }
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}
