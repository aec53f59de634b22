use tracing::debug;

use crate::{
    ast::{Block, Program, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, TokenKind},
        parser::scope::StaticScope,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// How deeply blocks may nest, counting function bodies and the bodies of
/// `repeat` and `if`.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Recursive-descent parser over a [`Lexer`].
///
/// Every rule is a `try_parse_*` method returning `Ok(None)` when the current
/// token cannot start its production, so the caller may try the next
/// alternative. Once a rule has committed to a production, any mismatch is an
/// error carrying the offending token's position.
///
/// Name resolution happens while parsing: each rule receives the
/// [`StaticScope`] it is parsed in.
pub struct Parser<'src> {
    pub(in crate::interpreter::parser) lexer: Lexer<'src>,
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { lexer: Lexer::new(source),
               depth: 0, }
    }

    /// Parses a whole program.
    ///
    /// Grammar: `program := statement* END`
    ///
    /// The top-level statements are resolved in a child of `root`, which is
    /// expected to hold the host's native function signatures.
    ///
    /// # Errors
    /// Returns the first [`ParseError`] encountered, including
    /// [`ParseError::TrailingInput`] when a token remains that cannot start a
    /// statement.
    ///
    /// # Example
    /// ```
    /// use autoscript::interpreter::parser::{core::Parser, scope::StaticScope};
    ///
    /// let mut root = StaticScope::root();
    /// root.declare_function("click", 2);
    ///
    /// let program = Parser::new("repeat (3) { click(10, 10) }").parse_program(&root).unwrap();
    /// assert_eq!(program.body.statements.len(), 1);
    ///
    /// assert!(Parser::new("click(1)").parse_program(&root).is_err());
    /// ```
    pub fn parse_program(&mut self, root: &StaticScope<'_>) -> ParseResult<Program> {
        let mut scope = StaticScope::child(root);
        let statements = self.parse_statements(&mut scope)?;

        let token = self.lexer.peek();
        match token.kind {
            TokenKind::End => {},
            TokenKind::Error(_) => return Err(ParseError::unexpected("statement", token)),
            _ => {
                return Err(ParseError::TrailingInput { line:   token.line,
                                                       column: token.column, });
            },
        }

        debug!(statements = statements.len(), "parsed program");
        Ok(Program { body: Block { statements } })
    }

    /// Parses a brace-delimited block in a fresh child scope.
    ///
    /// Grammar: `compound := "{" statement* "}"`
    ///
    /// Declarations made inside the block are dropped together with its scope
    /// once the closing brace is consumed.
    ///
    /// # Errors
    /// [`ParseError::NestingTooDeep`] at the opening brace of a block nested
    /// more than [`MAX_NESTING_DEPTH`] levels deep.
    pub(in crate::interpreter::parser) fn try_parse_compound(&mut self,
                                                             scope: &StaticScope<'_>)
                                                             -> ParseResult<Option<Block>> {
        let token = self.lexer.peek();
        if token.kind != TokenKind::LBrace {
            return Ok(None);
        }
        if self.depth == MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { limit:  MAX_NESTING_DEPTH,
                                                    line:   token.line,
                                                    column: token.column, });
        }
        self.lexer.advance();

        self.depth += 1;
        let mut inner = StaticScope::child(scope);
        let statements = self.parse_statements(&mut inner);
        self.depth -= 1;
        let statements = statements?;

        self.expect(&TokenKind::RBrace, "closing brace after compound statement")?;
        Ok(Some(Block { statements }))
    }

    /// Parses a compound statement that the grammar requires at this point.
    pub(in crate::interpreter::parser) fn parse_required_compound(&mut self,
                                                                  scope: &StaticScope<'_>,
                                                                  what: &'static str)
                                                                  -> ParseResult<Block> {
        match self.try_parse_compound(scope)? {
            Some(block) => Ok(block),
            None => Err(ParseError::unexpected(what, self.lexer.peek())),
        }
    }

    fn parse_statements(&mut self, scope: &mut StaticScope<'_>) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while let Some(statement) = self.try_parse_statement(scope)? {
            statements.push(statement);
        }
        Ok(statements)
    }

    /// Parses a single statement.
    ///
    /// Grammar:
    /// `statement := repeat | function-call | compound | if | def`
    ///
    /// Alternatives are attempted in that order; the first one whose leading
    /// token matches is parsed. Returns `Ok(None)` if no alternative applies.
    pub(in crate::interpreter::parser) fn try_parse_statement(&mut self,
                                                              scope: &mut StaticScope<'_>)
                                                              -> ParseResult<Option<Statement>> {
        if let Some(statement) = self.try_parse_repeat(scope)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.try_parse_function_call(scope)? {
            return Ok(Some(statement));
        }
        if let Some(block) = self.try_parse_compound(scope)? {
            return Ok(Some(Statement::Block(block)));
        }
        if let Some(statement) = self.try_parse_if(scope)? {
            return Ok(Some(statement));
        }
        if let Some(statement) = self.try_parse_def(scope)? {
            return Ok(Some(statement));
        }

        Ok(None)
    }
}
