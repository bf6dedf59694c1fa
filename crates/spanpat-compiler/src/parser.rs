//! Recursive-descent parser.
//!
//! Produces a resolved [`Expr`]: label types, properties and variants are looked up
//! through the [`TypeResolver`] as they are parsed, and capture groups are numbered
//! left to right by their opening token.
//!
//! Whitespace separates terms. Quantifiers and the `:`, `=` and `{` of a type match
//! must follow their operand directly, so the parser distinguishes the raw next
//! token ([`Parser::peek`]) from the next significant one ([`Parser::peek_significant`]).

use std::ops::Range;

use indexmap::IndexMap;
use spanpat_automaton::{Expected, GroupIndex, LabelMatch, Mode, PropertyCheck};
use spanpat_core::{LabelTypeId, TypeResolver};

use crate::ast::{Expr, GroupKind, PinCondition};
use crate::error::{CompileError, ErrorKind};
use crate::lexer::{Token, TokenKind, lex, unescape};
use crate::options::CompileOptions;

#[derive(Debug)]
pub struct Parsed {
    pub expr: Expr,
    pub group_count: usize,
    pub group_names: IndexMap<String, GroupIndex>,
}

pub fn parse(
    source: &str,
    resolver: &dyn TypeResolver,
    options: CompileOptions,
) -> Result<Parsed, CompileError> {
    let mut parser = Parser {
        source,
        tokens: lex(source),
        pos: 0,
        resolver,
        options,
        groups: Vec::new(),
        names: IndexMap::new(),
    };

    let expr = parser.parse_alts(0)?;
    match parser.peek_significant() {
        None => {}
        Some(TokenKind::ParenClose) => {
            return Err(CompileError::new(ErrorKind::UnbalancedParen, parser.current_range()));
        }
        Some(TokenKind::BracketClose) => {
            return Err(CompileError::new(ErrorKind::UnbalancedBracket, parser.current_range()));
        }
        Some(_) => return Err(parser.unexpected()),
    }

    Ok(Parsed {
        expr,
        group_count: parser.groups.len(),
        group_names: parser.names,
    })
}

#[derive(Debug)]
struct GroupInfo {
    /// Backreferences are legal only after the group closes.
    closed: bool,
    /// Type of the label the group binds, if any.
    label_type: Option<LabelTypeId>,
}

struct Parser<'s, 'r> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    resolver: &'r dyn TypeResolver,
    options: CompileOptions,
    groups: Vec<GroupInfo>,
    names: IndexMap<String, GroupIndex>,
}

impl<'s> Parser<'s, '_> {
    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn peek_significant(&mut self) -> Option<TokenKind> {
        self.skip_trivia();
        self.peek()
    }

    fn skip_trivia(&mut self) {
        while self.peek().is_some_and(TokenKind::is_trivia) {
            self.pos += 1;
        }
    }

    /// Kind of the first significant token after the current one.
    fn peek_significant_after(&self) -> Option<TokenKind> {
        self.tokens[(self.pos + 1).min(self.tokens.len())..]
            .iter()
            .map(|t| t.kind)
            .find(|k| !k.is_trivia())
    }

    fn current_range(&self) -> Range<usize> {
        match self.tokens.get(self.pos) {
            Some(token) => token.range.clone(),
            None => self.source.len()..self.source.len(),
        }
    }

    fn bump(&mut self) -> Range<usize> {
        let range = self.current_range();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        range
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Range<usize>> {
        (self.peek() == Some(kind)).then(|| self.bump())
    }

    fn text(&self, range: &Range<usize>) -> &'s str {
        &self.source[range.clone()]
    }

    fn unexpected(&self) -> CompileError {
        let range = self.current_range();
        if range.is_empty() {
            return CompileError::with_detail(ErrorKind::UnexpectedToken, range, "end of pattern");
        }
        let detail = format!("`{}`", self.text(&range));
        CompileError::with_detail(ErrorKind::UnexpectedToken, range, &detail)
    }

    /// `kind` at the current token, or `unclosed` at `open` if the input ended.
    fn missing(&self, kind: ErrorKind, unclosed: ErrorKind, open: &Range<usize>) -> CompileError {
        if self.peek().is_none() {
            CompileError::new(unclosed, open.clone())
        } else {
            CompileError::new(kind, self.current_range())
        }
    }

    fn parse_alts(&mut self, depth: u32) -> Result<Expr, CompileError> {
        if depth > self.options.recursion_limit {
            return Err(CompileError::new(
                ErrorKind::RecursionLimitExceeded,
                self.current_range(),
            ));
        }

        let mut arms = vec![self.parse_concat(depth)?];
        while self.peek_significant() == Some(TokenKind::Pipe) {
            self.bump();
            arms.push(self.parse_concat(depth)?);
        }
        Ok(if arms.len() == 1 {
            arms.swap_remove(0)
        } else {
            Expr::Alt(arms)
        })
    }

    fn parse_concat(&mut self, depth: u32) -> Result<Expr, CompileError> {
        let mut items = Vec::new();
        loop {
            match self.peek_significant() {
                None
                | Some(
                    TokenKind::Pipe
                    | TokenKind::ParenClose
                    | TokenKind::BracketClose
                    | TokenKind::Amp,
                ) => break,
                Some(_) => items.push(self.parse_term(depth)?),
            }
        }
        Ok(match items.len() {
            0 => Expr::Empty,
            1 => items.swap_remove(0),
            _ => Expr::Seq(items),
        })
    }

    fn parse_term(&mut self, depth: u32) -> Result<Expr, CompileError> {
        let atom = match self.peek() {
            Some(TokenKind::ParenOpen) => self.parse_group(depth)?,
            Some(TokenKind::BracketOpen) => self.parse_pin(depth)?,
            Some(TokenKind::Ident) => self.parse_type_match()?,
            _ => return Err(self.unexpected()),
        };
        self.parse_repetition(atom)
    }

    fn parse_group(&mut self, depth: u32) -> Result<Expr, CompileError> {
        let open = self.bump();

        let kind = if self.eat(TokenKind::Question).is_some() {
            match self.peek() {
                Some(TokenKind::Equals) => {
                    self.bump();
                    GroupKind::Lookahead { negative: false }
                }
                Some(TokenKind::Bang) => {
                    self.bump();
                    GroupKind::Lookahead { negative: true }
                }
                Some(TokenKind::Gt) => {
                    self.bump();
                    GroupKind::Atomic
                }
                Some(TokenKind::Lt) => {
                    self.bump();
                    let Some(name) = self.eat(TokenKind::Ident) else {
                        return Err(CompileError::new(
                            ErrorKind::ExpectedGroupName,
                            self.current_range(),
                        ));
                    };
                    if self.eat(TokenKind::Gt).is_none() {
                        return Err(self.unexpected());
                    }
                    GroupKind::Capture(self.declare_group(open.clone(), Some(&name))?)
                }
                _ => {
                    let end = self.current_range().end;
                    return Err(CompileError::new(
                        ErrorKind::UnknownGroupModifier,
                        open.start..end,
                    ));
                }
            }
        } else {
            GroupKind::Capture(self.declare_group(open.clone(), None)?)
        };

        let mut body = self.parse_alts(depth + 1)?;
        match self.peek_significant() {
            Some(TokenKind::ParenClose) => {
                self.bump();
            }
            None => return Err(CompileError::new(ErrorKind::UnclosedGroup, open)),
            Some(_) => return Err(self.unexpected()),
        }

        if let GroupKind::Capture(group) = kind {
            if let Expr::Match(matcher) | Expr::EnumMatch { matcher, .. } = &mut body
                && matcher.bind.is_none()
            {
                matcher.bind = Some(group);
                self.groups[group.index()].label_type = Some(matcher.type_id);
            }
            self.groups[group.index()].closed = true;
        }

        Ok(Expr::Group {
            kind,
            body: Box::new(body),
        })
    }

    fn declare_group(
        &mut self,
        site: Range<usize>,
        name: Option<&Range<usize>>,
    ) -> Result<GroupIndex, CompileError> {
        let Ok(index) = u16::try_from(self.groups.len()) else {
            return Err(CompileError::new(ErrorKind::TooManyGroups, site));
        };
        let group = GroupIndex(index);
        if let Some(range) = name {
            let name = self.text(range);
            if self.names.contains_key(name) {
                return Err(CompileError::with_detail(
                    ErrorKind::DuplicateGroupName,
                    range.clone(),
                    name,
                ));
            }
            self.names.insert(name.to_owned(), group);
        }
        self.groups.push(GroupInfo {
            closed: false,
            label_type: None,
        });
        Ok(group)
    }

    fn parse_pin(&mut self, depth: u32) -> Result<Expr, CompileError> {
        let open = self.bump();
        self.skip_trivia();
        let seek = self.eat(TokenKind::Question).is_some();
        self.skip_trivia();
        let all_covered = self.eat(TokenKind::Bang).is_some();
        self.skip_trivia();

        if self.peek() != Some(TokenKind::Ident) {
            return Err(self.missing(ErrorKind::ExpectedTypeName, ErrorKind::UnclosedPin, &open));
        }
        let mut pinned = self.parse_type_match()?;
        if let Some(matcher) = pinned.matcher_mut() {
            matcher.seek = seek;
        }

        let mut conditions = Vec::new();
        loop {
            match self.peek_significant() {
                Some(TokenKind::Amp) => {
                    self.bump();
                    self.skip_trivia();
                    let covered = self.eat(TokenKind::Bang).is_some() || all_covered;
                    let expr = self.parse_alts(depth + 1)?;
                    conditions.push(PinCondition { expr, covered });
                }
                Some(TokenKind::BracketClose) => {
                    self.bump();
                    break;
                }
                None => return Err(CompileError::new(ErrorKind::UnclosedPin, open)),
                Some(_) => return Err(self.unexpected()),
            }
        }

        Ok(Expr::Pin {
            pinned: Box::new(pinned),
            conditions,
        })
    }

    fn parse_type_match(&mut self) -> Result<Expr, CompileError> {
        let first = self.bump();

        let (variable, type_range) = if self.eat(TokenKind::Colon).is_some() {
            let Some(type_start) = self.eat(TokenKind::Ident) else {
                return Err(CompileError::new(
                    ErrorKind::ExpectedTypeName,
                    self.current_range(),
                ));
            };
            (Some(first), self.parse_type_name(type_start)?)
        } else {
            (None, self.parse_type_name(first)?)
        };

        let type_name = self.text(&type_range);
        let Some(type_id) = self.resolver.resolve_type(type_name) else {
            return Err(CompileError::with_detail(
                ErrorKind::UnknownType,
                type_range,
                type_name,
            ));
        };
        let mut matcher = LabelMatch::new(type_id, type_name);

        let bound = match &variable {
            Some(range) => {
                let group = self.declare_group(range.clone(), Some(range))?;
                self.groups[group.index()].label_type = Some(type_id);
                matcher.bind = Some(group);
                Some(group)
            }
            None => None,
        };

        let expr = if self.eat(TokenKind::Equals).is_some() {
            let Some(variant_range) = self.eat(TokenKind::Ident) else {
                return Err(CompileError::new(
                    ErrorKind::ExpectedVariantName,
                    self.current_range(),
                ));
            };
            let variant_name = self.text(&variant_range);
            let Some(variant) = self.resolver.resolve_variant(type_id, variant_name) else {
                let detail = format!("`{variant_name}` of `{type_name}`");
                return Err(CompileError::with_detail(
                    ErrorKind::UnknownVariant,
                    variant_range,
                    &detail,
                ));
            };
            Expr::EnumMatch {
                matcher,
                variant,
                variant_name: variant_name.to_owned(),
            }
        } else {
            if self.peek() == Some(TokenKind::BraceOpen)
                && self.peek_significant_after() == Some(TokenKind::Ident)
            {
                self.parse_properties(&mut matcher)?;
            }
            Expr::Match(matcher)
        };

        if let Some(group) = bound {
            self.groups[group.index()].closed = true;
        }
        Ok(expr)
    }

    /// `IDENT ('.' IDENT)*`, starting after the first identifier.
    fn parse_type_name(&mut self, first: Range<usize>) -> Result<Range<usize>, CompileError> {
        let mut end = first.end;
        while self.eat(TokenKind::Dot).is_some() {
            let Some(segment) = self.eat(TokenKind::Ident) else {
                return Err(CompileError::new(
                    ErrorKind::ExpectedTypeName,
                    self.current_range(),
                ));
            };
            end = segment.end;
        }
        Ok(first.start..end)
    }

    fn parse_properties(&mut self, matcher: &mut LabelMatch) -> Result<(), CompileError> {
        let open = self.bump();
        loop {
            self.skip_trivia();
            let Some(name_range) = self.eat(TokenKind::Ident) else {
                return Err(self.missing(
                    ErrorKind::ExpectedPropertyName,
                    ErrorKind::UnclosedProperties,
                    &open,
                ));
            };
            let name = self.text(&name_range);
            let Some(property) = self.resolver.resolve_property(matcher.type_id, name) else {
                let detail = format!("`{name}` on `{}`", matcher.type_name);
                return Err(CompileError::with_detail(
                    ErrorKind::UnknownProperty,
                    name_range,
                    &detail,
                ));
            };

            self.skip_trivia();
            if self.eat(TokenKind::Equals).is_none() {
                if self.peek().is_none() {
                    return Err(CompileError::new(ErrorKind::UnclosedProperties, open));
                }
                return Err(self.unexpected());
            }
            self.skip_trivia();
            let expected = self.parse_property_value(&open)?;
            matcher.checks.push(PropertyCheck {
                property,
                name: name.to_owned(),
                expected,
            });

            match self.peek_significant() {
                Some(TokenKind::Comma) => {
                    self.bump();
                }
                Some(TokenKind::BraceClose) => {
                    self.bump();
                    return Ok(());
                }
                None => return Err(CompileError::new(ErrorKind::UnclosedProperties, open)),
                Some(_) => return Err(self.unexpected()),
            }
        }
    }

    fn parse_property_value(&mut self, open: &Range<usize>) -> Result<Expected, CompileError> {
        match self.peek() {
            Some(TokenKind::Str) => {
                let range = self.bump();
                Ok(Expected::Str(unescape(self.text(&range))))
            }
            Some(TokenKind::Number) => {
                let range = self.bump();
                if let Some(TokenKind::Ident | TokenKind::Dot | TokenKind::Number) = self.peek() {
                    let tail = self.bump();
                    let whole = range.start..tail.end;
                    let detail = format!("`{}`", self.text(&whole));
                    return Err(CompileError::with_detail(
                        ErrorKind::InvalidNumber,
                        whole,
                        &detail,
                    ));
                }
                let text = self.text(&range);
                text.parse::<f64>().map(Expected::Number).map_err(|_| {
                    CompileError::with_detail(ErrorKind::InvalidNumber, range.clone(), text)
                })
            }
            Some(TokenKind::Ident) => {
                let range = self.bump();
                let text = self.text(&range);
                parse_bool(text)
                    .map(Expected::Bool)
                    .ok_or_else(|| CompileError::with_detail(ErrorKind::InvalidBoolean, range, text))
            }
            Some(TokenKind::Dollar) => {
                self.bump();
                self.parse_backreference()
            }
            None => Err(CompileError::new(ErrorKind::UnclosedProperties, open.clone())),
            Some(_) => Err(CompileError::new(
                ErrorKind::ExpectedPropertyValue,
                self.current_range(),
            )),
        }
    }

    /// `NAME ('.' NAME)?` after `$`.
    fn parse_backreference(&mut self) -> Result<Expected, CompileError> {
        let Some(name_range) = self.eat(TokenKind::Ident) else {
            return Err(CompileError::new(
                ErrorKind::ExpectedGroupName,
                self.current_range(),
            ));
        };
        let name = self.text(&name_range);
        let Some(&group) = self.names.get(name) else {
            return Err(CompileError::with_detail(
                ErrorKind::UndefinedGroup,
                name_range,
                name,
            ));
        };
        let info = &self.groups[group.index()];
        if !info.closed {
            return Err(CompileError::with_detail(
                ErrorKind::ForwardReference,
                name_range,
                name,
            ));
        }
        let label_type = info.label_type;

        if self.eat(TokenKind::Dot).is_none() {
            return Ok(Expected::Span(group));
        }
        let Some(property_range) = self.eat(TokenKind::Ident) else {
            return Err(CompileError::new(
                ErrorKind::ExpectedPropertyName,
                self.current_range(),
            ));
        };
        let property_name = self.text(&property_range);
        let Some(label_type) = label_type else {
            return Err(CompileError::with_detail(
                ErrorKind::GroupWithoutLabel,
                name_range,
                name,
            ));
        };
        let Some(property) = self.resolver.resolve_property(label_type, property_name) else {
            let detail = format!("`{property_name}` on group `{name}`");
            return Err(CompileError::with_detail(
                ErrorKind::UnknownProperty,
                property_range,
                &detail,
            ));
        };
        Ok(Expected::Property {
            group,
            property,
            name: property_name.to_owned(),
        })
    }

    fn parse_repetition(&mut self, atom: Expr) -> Result<Expr, CompileError> {
        let limit = self.options.loop_limit;
        let bounds = match self.peek() {
            Some(TokenKind::Question) => {
                self.bump();
                None
            }
            Some(TokenKind::Star) => {
                self.bump();
                Some((0, limit))
            }
            Some(TokenKind::Plus) => {
                self.bump();
                Some((1u32.min(limit), limit))
            }
            Some(TokenKind::BraceOpen) => Some(self.parse_bounds()?),
            _ => return Ok(atom),
        };

        let mode = if self.eat(TokenKind::Question).is_some() {
            Mode::Lazy
        } else if self.eat(TokenKind::Plus).is_some() {
            Mode::Possessive
        } else {
            Mode::Greedy
        };

        let body = Box::new(atom);
        Ok(match bounds {
            None => Expr::Optional { body, mode },
            Some((min, max)) => Expr::Repeat {
                body,
                min,
                max,
                mode,
            },
        })
    }

    /// `'{' min (',' max?)? '}'`, clamped to the loop limit.
    fn parse_bounds(&mut self) -> Result<(u32, u32), CompileError> {
        let open = self.bump();
        self.skip_trivia();
        let min = self.parse_bound(&open)?;
        self.skip_trivia();
        let max = if self.eat(TokenKind::Comma).is_some() {
            self.skip_trivia();
            match self.peek() {
                Some(TokenKind::Number) => Some(self.parse_bound(&open)?),
                _ => None,
            }
        } else {
            Some(min)
        };
        self.skip_trivia();
        let close = match self.peek() {
            Some(TokenKind::BraceClose) => self.bump(),
            None => return Err(CompileError::new(ErrorKind::UnclosedRepetition, open)),
            Some(_) => return Err(self.unexpected()),
        };

        if let Some(max) = max
            && max < min
        {
            let detail = format!("maximum {max} is less than minimum {min}");
            return Err(CompileError::with_detail(
                ErrorKind::InvalidRepetitionRange,
                open.start..close.end,
                &detail,
            ));
        }

        let limit = self.options.loop_limit;
        Ok((min.min(limit), max.unwrap_or(limit).min(limit)))
    }

    fn parse_bound(&mut self, open: &Range<usize>) -> Result<u32, CompileError> {
        match self.peek() {
            Some(TokenKind::Number) => {
                let range = self.bump();
                let text = self.text(&range);
                if text.starts_with('-') || text.contains('.') {
                    return Err(CompileError::with_detail(
                        ErrorKind::InvalidRepetitionRange,
                        range,
                        "bounds must be non-negative integers",
                    ));
                }
                Ok(text.parse::<u32>().unwrap_or(u32::MAX))
            }
            None => Err(CompileError::new(ErrorKind::UnclosedRepetition, open.clone())),
            Some(_) => Err(CompileError::with_detail(
                ErrorKind::InvalidRepetitionRange,
                self.current_range(),
                "expected a number",
            )),
        }
    }
}

/// `true`/`yes` and `false`/`no`, case-insensitive.
fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}
