use tracing::trace;

use crate::{
    ast::{FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, Parser},
            scope::{Lookup, StaticScope},
        },
    },
};

impl Parser<'_> {
    /// Parses a `repeat` statement.
    ///
    /// Grammar: `repeat := "repeat" "(" INTEGER ")" compound`
    ///
    /// The count must be an integer literal; it becomes a fixed iteration
    /// count rather than a computed bound.
    ///
    /// # Returns
    /// - `Ok(Some(Statement::Repeat))` if the statement was parsed,
    /// - `Ok(None)` if the current token is not `repeat`.
    pub(in crate::interpreter::parser) fn try_parse_repeat(&mut self,
                                                           scope: &StaticScope<'_>)
                                                           -> ParseResult<Option<Statement>> {
        if self.lexer.peek().kind != TokenKind::Repeat {
            return Ok(None);
        }
        self.lexer.advance();

        self.expect(&TokenKind::LParen, "opening parenthesis")?;

        let token = self.lexer.peek();
        let TokenKind::Integer(count) = token.kind else {
            return Err(ParseError::unexpected("number", token));
        };
        let count = u64::try_from(count).map_err(|_| ParseError::unexpected("number", token))?;
        self.lexer.advance();

        self.expect(&TokenKind::RParen, "closing parenthesis")?;

        let body = self.parse_required_compound(scope, "compound statement after repeat")?;
        Ok(Some(Statement::Repeat { count, body }))
    }

    /// Parses an `if` statement.
    ///
    /// Grammar: `if := "if" "(" expr ")" compound`
    ///
    /// The condition is only resolved here; whether it is a boolean is checked
    /// when it runs.
    pub(in crate::interpreter::parser) fn try_parse_if(&mut self,
                                                       scope: &StaticScope<'_>)
                                                       -> ParseResult<Option<Statement>> {
        if self.lexer.peek().kind != TokenKind::If {
            return Ok(None);
        }
        self.lexer.advance();

        self.expect(&TokenKind::LParen, "opening parenthesis")?;

        let Some(condition) = self.try_parse_expr(scope)? else {
            return Err(ParseError::unexpected("expression", self.lexer.peek()));
        };

        self.expect(&TokenKind::RParen, "closing parenthesis")?;

        let body = self.parse_required_compound(scope, "compound statement after if")?;
        Ok(Some(Statement::If { condition, body }))
    }

    /// Parses a function definition.
    ///
    /// Grammar: `def := "def" IDENT "(" namelist ")" compound`
    ///
    /// The signature is declared in `scope` before the body is parsed, so the
    /// body may call the function recursively. The body is parsed in a child
    /// scope holding the parameters, and it can only see what was declared
    /// before this point: a later sibling definition is out of reach.
    ///
    /// # Errors
    /// Returns a `ParseError` if:
    /// - the name or the parameter list is malformed,
    /// - a function with this name is already defined in `scope`,
    /// - the body is missing or fails to parse.
    pub(in crate::interpreter::parser) fn try_parse_def(&mut self,
                                                        scope: &mut StaticScope<'_>)
                                                        -> ParseResult<Option<Statement>> {
        if self.lexer.peek().kind != TokenKind::Def {
            return Ok(None);
        }
        self.lexer.advance();

        let name_token = self.lexer.peek().clone();
        let TokenKind::Identifier(name) = name_token.kind else {
            return Err(ParseError::unexpected("identifier for function name", self.lexer.peek()));
        };
        self.lexer.advance();

        self.expect(&TokenKind::LParen, "opening parenthesis")?;
        let params = self.parse_namelist_until_rparen()?;
        self.expect(&TokenKind::RParen, "closing parenthesis")?;

        if !scope.declare_function(&name, params.len()) {
            return Err(ParseError::FunctionAlreadyDefined { name,
                                                            line: name_token.line,
                                                            column: name_token.column });
        }
        trace!(function = %name, arity = params.len(), "declared function");

        let mut inner = StaticScope::child(scope);
        for param in &params {
            inner.declare_variable(param);
        }

        let body = self.parse_required_compound(&inner, "compound statement for function body")?;
        Ok(Some(Statement::FunctionDef(FunctionDef { name, params, body })))
    }

    /// Parses a function call and resolves its signature.
    ///
    /// Grammar: `function-call := IDENT "(" paramlist ")"`
    ///
    /// The `(name, argument count)` pair is resolved against `scope` once the
    /// closing parenthesis has been read, so arity mismatches are rejected
    /// before anything runs.
    ///
    /// # Errors
    /// - [`ParseError::UnknownFunction`] if no function of that name is
    ///   visible.
    /// - [`ParseError::WrongSignature`] if the name is visible only with a
    ///   different arity.
    ///
    /// Both are positioned at the function name.
    pub(in crate::interpreter::parser) fn try_parse_function_call(&mut self,
                                                                  scope: &StaticScope<'_>)
                                                                  -> ParseResult<Option<Statement>> {
        let name_token = self.lexer.peek().clone();
        let TokenKind::Identifier(name) = name_token.kind else {
            return Ok(None);
        };
        self.lexer.advance();

        self.expect(&TokenKind::LParen, "left parenthesis for function call")?;
        let arguments = self.parse_paramlist_until_rparen(scope)?;
        self.expect(&TokenKind::RParen, "right parenthesis after function call arg list")?;

        match scope.lookup_function(&name, arguments.len()) {
            Lookup::Found => Ok(Some(Statement::FunctionCall { name, arguments })),
            Lookup::WrongSignature => Err(ParseError::WrongSignature { name,
                                                                      arity: arguments.len(),
                                                                      line: name_token.line,
                                                                      column: name_token.column }),
            Lookup::NotFound => Err(ParseError::UnknownFunction { name,
                                                                 line: name_token.line,
                                                                 column: name_token.column }),
        }
    }
}
