use std::{collections::HashSet, time::Duration};

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, Parser},
            scope::StaticScope,
        },
    },
};

impl Parser<'_> {
    /// Consumes the current token if it is `kind`.
    ///
    /// # Errors
    /// Returns a `ParseError` describing `what` was expected, positioned at the
    /// token actually found.
    pub(in crate::interpreter::parser) fn expect(&mut self,
                                                 kind: &TokenKind,
                                                 what: &'static str)
                                                 -> ParseResult<()> {
        if &self.lexer.peek().kind != kind {
            return Err(ParseError::unexpected(what, self.lexer.peek()));
        }
        self.lexer.advance();
        Ok(())
    }

    /// Parses an expression, if one starts at the current token.
    ///
    /// Grammar: `expr := INTEGER | DURATION | BOOL | IDENT`
    ///
    /// An identifier must name a variable visible from `scope`.
    ///
    /// # Returns
    /// - `Ok(Some(expr))` if an expression was parsed.
    /// - `Ok(None)` if the current token cannot start an expression; nothing is
    ///   consumed.
    ///
    /// # Errors
    /// [`ParseError::UnknownVariable`] for an unresolved identifier.
    pub(in crate::interpreter::parser) fn try_parse_expr(&mut self,
                                                         scope: &StaticScope<'_>)
                                                         -> ParseResult<Option<Expr>> {
        let token = self.lexer.peek();
        let expr = match &token.kind {
            TokenKind::Integer(n) => Expr::Integer(*n),
            TokenKind::Duration(secs) => Expr::Duration(Duration::from_secs(*secs)),
            TokenKind::Bool(b) => Expr::Bool(*b),
            TokenKind::Identifier(name) => {
                if !scope.lookup_variable(name) {
                    return Err(ParseError::UnknownVariable { name:   name.clone(),
                                                             line:   token.line,
                                                             column: token.column, });
                }
                Expr::Variable(name.clone())
            },
            _ => return Ok(None),
        };
        self.lexer.advance();

        Ok(Some(expr))
    }

    /// Parses a comma-separated list of items up to, but not including, a
    /// closing `)`.
    ///
    /// An immediately encountered `)` produces an empty list. After each item
    /// the parser expects either a comma, to continue, or the closing
    /// parenthesis.
    ///
    /// Grammar (simplified): `list := (item ("," item)*)?`
    ///
    /// # Parameters
    /// - `parse_item`: Parses one element.
    /// - `separator`: Description used when neither `,` nor `)` follows an
    ///   item.
    fn parse_comma_separated<T>(&mut self,
                                mut parse_item: impl FnMut(&mut Self) -> ParseResult<T>,
                                separator: &'static str)
                                -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if self.lexer.peek().kind == TokenKind::RParen {
            return Ok(items);
        }
        loop {
            items.push(parse_item(self)?);
            if self.lexer.peek().kind == TokenKind::RParen {
                return Ok(items);
            }
            self.expect(&TokenKind::Comma, separator)?;
        }
    }

    /// Parses call arguments up to the closing `)`.
    ///
    /// Grammar: `paramlist := (expr ("," expr)*)?`
    pub(in crate::interpreter::parser) fn parse_paramlist_until_rparen(&mut self,
                                                                       scope: &StaticScope<'_>)
                                                                       -> ParseResult<Vec<Expr>> {
        self.parse_comma_separated(|parser| match parser.try_parse_expr(scope)? {
                                       Some(expr) => Ok(expr),
                                       None => {
                                           Err(ParseError::unexpected("argument",
                                                                      parser.lexer.peek()))
                                       },
                                   },
                                   "comma between arguments")
    }

    /// Parses parameter names of a `def` up to the closing `)`.
    ///
    /// Grammar: `namelist := (IDENT ("," IDENT)*)?`
    ///
    /// # Errors
    /// [`ParseError::DuplicateParameter`] if a name appears twice.
    pub(in crate::interpreter::parser) fn parse_namelist_until_rparen(&mut self)
                                                                      -> ParseResult<Vec<String>> {
        let mut seen = HashSet::new();
        self.parse_comma_separated(|parser| {
                                       let token = parser.lexer.peek();
                                       let TokenKind::Identifier(name) = &token.kind else {
                                           return Err(ParseError::unexpected("identifier for argument name",
                                                                             token));
                                       };
                                       if !seen.insert(name.clone()) {
                                           return Err(ParseError::DuplicateParameter { name:   name.clone(),
                                                                                       line:   token.line,
                                                                                       column: token.column, });
                                       }
                                       let name = name.clone();
                                       parser.lexer.advance();
                                       Ok(name)
                                   },
                                   "comma between argument names")
    }
}
