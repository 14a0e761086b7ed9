//! Recursive range evaluator
//!
//! `eval` works on a closed token range `[p, q]`, held here as the
//! half-open `start..end` with `end = q + 1`, so `p > q` is `start >= end`.
//! Cases are checked in order: empty range, single operand, fully
//! parenthesized range, then a split at the main operator.

use super::error::EvalError;
use crate::config::constants::compile_time::evaluation::MAX_EVAL_DEPTH;
use crate::config::runtime::{EvaluationPreferences, UnresolvedRegisterPolicy};
use crate::logging::codes;
use crate::machine::{EvalContext, Word, WORD_BYTES};
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::utils::Span;

/// Evaluates disambiguated token streams against a machine context
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    preferences: EvaluationPreferences,
}

/// Per-call evaluation state
struct Frame<'s, 'c, 'a> {
    stream: &'s TokenStream,
    context: &'c EvalContext<'a>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: EvaluationPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &EvaluationPreferences {
        &self.preferences
    }

    /// Evaluate the whole stream
    pub fn evaluate(
        &self,
        stream: &TokenStream,
        context: &EvalContext<'_>,
    ) -> Result<Word, EvalError> {
        check_balance(stream)?;
        let frame = Frame { stream, context };
        self.eval(&frame, 0, stream.len(), 1)
    }

    /// Evaluate the closed range `[p, q]`; `p > q` is an empty operand
    pub fn evaluate_range(
        &self,
        stream: &TokenStream,
        context: &EvalContext<'_>,
        p: usize,
        q: usize,
    ) -> Result<Word, EvalError> {
        let frame = Frame { stream, context };
        if p > q {
            return Err(EvalError::EmptyOperand {
                span: gap_span(stream, p),
            });
        }
        let end = q.saturating_add(1).min(stream.len());
        self.eval(&frame, p, end, 1)
    }

    fn eval(&self, frame: &Frame, start: usize, end: usize, depth: usize) -> Result<Word, EvalError> {
        if depth > MAX_EVAL_DEPTH {
            return Err(EvalError::ExpressionTooDeep { depth });
        }

        let stream = frame.stream;

        if start >= end {
            return Err(EvalError::EmptyOperand {
                span: gap_span(stream, start),
            });
        }

        if end - start == 1 {
            return match stream.get(start) {
                Some(token) => self.eval_operand(frame, token),
                None => Err(EvalError::EmptyOperand {
                    span: gap_span(stream, start),
                }),
            };
        }

        if is_wrapped(stream, start, end) {
            return self.eval(frame, start + 1, end - 1, depth + 1);
        }

        let Some((op, kind)) = main_operator(stream, start, end) else {
            let span = stream.span_range(start, end - 1);
            return Err(EvalError::MalformedExpression {
                start: span.start,
                end: span.end,
            });
        };

        if self.preferences.log_evaluation_steps {
            log_debug!("Main operator selected",
                "range" => format!("{}..{}", start, end),
                "index" => op,
                "operator" => kind,
                "depth" => depth
            );
        }

        let op_span = stream.span_at(op).unwrap_or_default();

        if kind.is_unary() {
            // Leftmost-unary selection puts a prefix chain's first operator at `start`
            if op != start {
                let span = stream.span_range(start, end - 1);
                return Err(EvalError::MalformedExpression {
                    start: span.start,
                    end: span.end,
                });
            }

            let value = self.eval(frame, op + 1, end, depth + 1)?;
            return match kind {
                TokenKind::Neg => Ok(value.wrapping_neg()),
                _ => frame
                    .context
                    .read_memory(value, WORD_BYTES)
                    .map_err(|source| EvalError::UnreadableAddress {
                        address: value,
                        span: stream.span_range(op, end - 1),
                        source,
                    }),
            };
        }

        // Binary splits keep the depth; only nesting steps count toward the limit
        let left = self.eval(frame, start, op, depth)?;
        let right = self.eval(frame, op + 1, end, depth)?;
        apply_binary(kind, left, right, op_span)
    }

    /// Resolve a single-token range
    fn eval_operand(&self, frame: &Frame, token: &Token) -> Result<Word, EvalError> {
        match token.kind {
            TokenKind::Number => parse_literal(&token.text, 10, token),
            TokenKind::Hex => {
                let digits = token
                    .text
                    .strip_prefix("0x")
                    .or_else(|| token.text.strip_prefix("0X"))
                    .unwrap_or(&token.text);
                parse_literal(digits, 16, token)
            }
            TokenKind::Register => match frame.context.read_register(&token.text) {
                Some(value) => Ok(value),
                None => match self.preferences.unresolved_register_policy {
                    UnresolvedRegisterPolicy::Error => Err(EvalError::UnresolvedRegister {
                        name: token.text.clone(),
                        span: token.span,
                    }),
                    UnresolvedRegisterPolicy::Zero => {
                        log_warning!(codes::evaluation::REGISTER_DEFAULTED_TO_ZERO,
                            "Unresolved register evaluated as zero",
                            "register" => token.text.as_str()
                        );
                        Ok(0)
                    }
                },
            },
            kind => Err(EvalError::InvalidOperand {
                kind,
                span: token.span,
            }),
        }
    }
}

fn parse_literal(digits: &str, radix: u32, token: &Token) -> Result<Word, EvalError> {
    Word::from_str_radix(digits, radix).map_err(|_| EvalError::LiteralOutOfRange {
        text: token.text.clone(),
        span: token.span,
    })
}

fn apply_binary(kind: TokenKind, left: Word, right: Word, span: Span) -> Result<Word, EvalError> {
    let truth = |value: bool| Word::from(value);

    let value = match kind {
        TokenKind::Plus => left.wrapping_add(right),
        TokenKind::Minus => left.wrapping_sub(right),
        TokenKind::Star => left.wrapping_mul(right),
        TokenKind::Slash => {
            if right == 0 {
                return Err(EvalError::DivisionByZero { span });
            }
            left / right
        }
        TokenKind::Eq => truth(left == right),
        TokenKind::Neq => truth(left != right),
        TokenKind::And => truth(left != 0 && right != 0),
        TokenKind::Or => truth(left != 0 || right != 0),
        other => {
            return Err(EvalError::InvalidOperand { kind: other, span });
        }
    };

    Ok(value)
}

/// Zero-width span where an operand was expected
fn gap_span(stream: &TokenStream, index: usize) -> Span {
    stream
        .span_at(index)
        .map(|span| Span::point(span.start))
        .unwrap_or_else(|| stream.span_range(index, index))
}

/// Check every parenthesis in the stream has a partner
pub fn check_balance(stream: &TokenStream) -> Result<(), EvalError> {
    let mut open = Vec::new();

    for token in stream.iter() {
        match token.kind {
            TokenKind::LParen => open.push(token.span.start),
            TokenKind::RParen => {
                if open.pop().is_none() {
                    return Err(EvalError::UnbalancedParentheses {
                        position: token.span.start,
                    });
                }
            }
            _ => {}
        }
    }

    match open.pop() {
        Some(position) => Err(EvalError::UnbalancedParentheses { position }),
        None => Ok(()),
    }
}

/// Whether `start..end` is one parenthesized group whose outer pair match
pub fn is_wrapped(stream: &TokenStream, start: usize, end: usize) -> bool {
    if end < start + 2
        || stream.kind_at(start) != Some(TokenKind::LParen)
        || stream.kind_at(end - 1) != Some(TokenKind::RParen)
    {
        return false;
    }

    let mut depth: usize = 0;
    for index in start + 1..end - 1 {
        match stream.kind_at(index) {
            Some(TokenKind::LParen) => depth += 1,
            Some(TokenKind::RParen) => match depth.checked_sub(1) {
                Some(next) => depth = next,
                None => return false,
            },
            _ => {}
        }
    }

    depth == 0
}

/// Index and kind of the operator at which `start..end` splits
///
/// Only depth-0 operators are candidates and the lowest rank wins. Binary
/// ties go to the rightmost candidate for left associativity. Unary ties go
/// to the leftmost so that prefix chains nest.
pub fn main_operator(stream: &TokenStream, start: usize, end: usize) -> Option<(usize, TokenKind)> {
    let mut depth: usize = 0;
    let mut selected: Option<(usize, TokenKind, u8)> = None;

    for index in start..end {
        let kind = stream.kind_at(index)?;
        match kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            _ if depth == 0 => {
                let Some(rank) = kind.precedence() else {
                    continue;
                };
                let replace = match selected {
                    None => true,
                    Some((_, _, min)) => rank < min || (rank == min && !kind.is_unary()),
                };
                if replace {
                    selected = Some((index, kind, rank));
                }
            }
            _ => {}
        }
    }

    selected.map(|(index, kind, _)| (index, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disambiguation::disambiguate;
    use crate::lexical::LexicalAnalyzer;
    use crate::machine::testing::MockMachine;
    use crate::machine::MemoryError;
    use assert_matches::assert_matches;

    fn stream(input: &str) -> TokenStream {
        let mut stream = LexicalAnalyzer::new().unwrap().tokenize(input).unwrap();
        disambiguate(&mut stream);
        stream
    }

    fn evaluator(policy: UnresolvedRegisterPolicy) -> Evaluator {
        Evaluator::with_preferences(EvaluationPreferences {
            unresolved_register_policy: policy,
            log_evaluation_steps: false,
        })
    }

    fn eval_on(input: &str, machine: &MockMachine) -> Result<Word, EvalError> {
        evaluator(UnresolvedRegisterPolicy::Error).evaluate(&stream(input), &machine.context())
    }

    fn eval(input: &str) -> Result<Word, EvalError> {
        eval_on(input, &MockMachine::new())
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1+2*3"), Ok(7));
        assert_eq!(eval("(1+2)*3"), Ok(9));
        assert_eq!(eval("1+2==3"), Ok(1));
        assert_eq!(eval("2*3==6&&1"), Ok(1));
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(eval("8-3-2"), Ok(3));
        assert_eq!(eval("8/4/2"), Ok(1));
        assert_eq!(eval("2*6/3"), Ok(4));
    }

    #[test]
    fn test_negation() {
        assert_eq!(eval("-3+5"), Ok(2));
        assert_eq!(eval("-(2+3)"), Ok((5 as Word).wrapping_neg()));
        assert_eq!(eval("4*-2+9"), Ok(1));
        assert_eq!(eval("0-1"), Ok(Word::MAX));
    }

    #[test]
    fn test_logical_and_comparison() {
        assert_eq!(eval("1==1&&0"), Ok(0));
        assert_eq!(eval("1||0&&0"), Ok(1));
        assert_eq!(eval("3!=4"), Ok(1));
        assert_eq!(eval("7&&9"), Ok(1));
        assert_eq!(eval("0||0"), Ok(0));
    }

    #[test]
    fn test_literals() {
        assert_eq!(eval("0x10"), Ok(16));
        assert_eq!(eval("0XfF"), Ok(255));
        assert_eq!(eval("(((42)))"), Ok(42));
    }

    #[test]
    fn test_literal_out_of_range() {
        let too_big = format!("{}0", Word::MAX);
        assert_matches!(eval(&too_big), Err(EvalError::LiteralOutOfRange { text, .. }) if text == too_big);
    }

    #[test]
    fn test_registers() {
        let machine = MockMachine::new().with_register("$sp", 0x100).with_register("$0", 0);
        assert_eq!(eval_on("$sp+4", &machine), Ok(0x104));
        assert_eq!(eval_on("$0", &machine), Ok(0));
        assert_eq!(machine.register_reads(), vec!["$sp".to_string(), "$0".to_string()]);
    }

    #[test]
    fn test_unresolved_register_policy() {
        let machine = MockMachine::new();
        assert_matches!(
            eval_on("$a0", &machine),
            Err(EvalError::UnresolvedRegister { name, .. }) if name == "$a0"
        );

        let lenient = evaluator(UnresolvedRegisterPolicy::Zero);
        assert_eq!(lenient.evaluate(&stream("$a0+1"), &machine.context()), Ok(1));
    }

    #[test]
    fn test_dereference() {
        let machine = MockMachine::new().with_word(0, 0x1234).with_word(8, 0);
        assert_eq!(eval_on("*0", &machine), Ok(0x1234));
        assert_eq!(eval_on("2**8", &machine), Ok(0));
        assert_eq!(machine.memory_reads(), vec![(0, WORD_BYTES), (8, WORD_BYTES)]);
    }

    #[test]
    fn test_dereference_chain_nests() {
        let machine = MockMachine::new().with_word(0, 8).with_word(8, 99);
        assert_eq!(eval_on("**0", &machine), Ok(99));
        assert_eq!(eval_on("*(*0)", &machine), Ok(99));
        assert_eq!(eval_on("-*0", &machine), Ok((8 as Word).wrapping_neg()));
    }

    #[test]
    fn test_unreadable_address() {
        assert_matches!(
            eval("*0x40"),
            Err(EvalError::UnreadableAddress {
                address: 0x40,
                source: MemoryError::OutOfBounds { .. },
                ..
            })
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_matches!(eval("5/0"), Err(EvalError::DivisionByZero { span }) if span == Span::new(1, 2));
        assert_matches!(eval("5/(1-1)"), Err(EvalError::DivisionByZero { .. }));
    }

    #[test]
    fn test_structural_errors() {
        assert_matches!(eval("(1+2"), Err(EvalError::UnbalancedParentheses { position: 0 }));
        assert_matches!(eval("1+2)"), Err(EvalError::UnbalancedParentheses { position: 3 }));
        assert_matches!(eval("1+"), Err(EvalError::EmptyOperand { .. }));
        assert_matches!(eval("()"), Err(EvalError::EmptyOperand { .. }));
        assert_matches!(eval("1 2"), Err(EvalError::MalformedExpression { start: 0, end: 3 }));
        assert_matches!(eval("(1)(2)"), Err(EvalError::MalformedExpression { .. }));
        assert_matches!(eval("--3"), Err(EvalError::InvalidOperand { kind: TokenKind::Neg, .. }));
    }

    #[test]
    fn test_empty_stream() {
        assert_matches!(eval(""), Err(EvalError::EmptyOperand { span }) if span == Span::point(0));
    }

    #[test]
    fn test_outer_parenthesis_matching() {
        // Outer pair of "(1)+(2)" does not match each other
        assert!(!is_wrapped(&stream("(1)+(2)"), 0, 7));
        assert!(is_wrapped(&stream("((1)+(2))"), 0, 9));
        assert_eq!(eval("(1)+(2)"), Ok(3));
    }

    #[test]
    fn test_main_operator_selection() {
        let s = stream("1-2-3");
        assert_eq!(main_operator(&s, 0, s.len()), Some((3, TokenKind::Minus)));

        let s = stream("(1||0)&&1");
        assert_eq!(main_operator(&s, 0, s.len()), Some((5, TokenKind::And)));

        // Equal-rank unary ties go to the leftmost operator. A rightmost pick
        // would split "-*0" at `*` and evaluate it as "*0", losing the `-`
        let s = stream("-*0");
        assert_eq!(main_operator(&s, 0, s.len()), Some((0, TokenKind::Neg)));
    }

    #[test]
    fn test_depth_limit() {
        let nested = format!("{}1{}", "(".repeat(MAX_EVAL_DEPTH), ")".repeat(MAX_EVAL_DEPTH));
        assert_matches!(eval(&nested), Err(EvalError::ExpressionTooDeep { .. }));

        let shallow = format!("{}1{}", "(".repeat(MAX_EVAL_DEPTH - 1), ")".repeat(MAX_EVAL_DEPTH - 1));
        assert_eq!(eval(&shallow), Ok(1));
    }

    #[test]
    fn test_flat_chain_is_not_nesting() {
        let sum = vec!["1"; 300].join("+");
        assert_eq!(eval(&sum), Ok(300));

        let product = format!("1{}", "*1".repeat(400));
        assert_eq!(eval(&product), Ok(1));

        let mixed = format!("{}-{}1{}", vec!["2"; 300].join("+"), "(".repeat(10), ")".repeat(10));
        assert_eq!(eval(&mixed), Ok(599));
    }

    #[test]
    fn test_evaluate_range() {
        let s = stream("1+2*3");
        let context = MockMachine::new();
        let evaluator = Evaluator::new();
        assert_eq!(evaluator.evaluate_range(&s, &context.context(), 2, 4), Ok(6));
        assert_matches!(
            evaluator.evaluate_range(&s, &context.context(), 3, 2),
            Err(EvalError::EmptyOperand { .. })
        );
    }
}
