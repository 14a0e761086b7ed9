//! End-to-end evaluation against a real register file and guest memory

use assert_matches::assert_matches;
use sdb_expr::config::{
    EvaluationPreferences, LexicalPreferences, OverlongTokenPolicy, UnresolvedRegisterPolicy,
};
use sdb_expr::machine::DEFAULT_MEMORY_BASE;
use sdb_expr::{
    expr, expr_with_flag, EvalContext, EvalError, ExprEngine, ExprError, LexerError,
    PhysicalMemory, RiscvRegisters, Word,
};

struct Machine {
    registers: RiscvRegisters,
    memory: PhysicalMemory,
}

impl Machine {
    /// 64 bytes of memory at address 0 and a few named registers
    fn new() -> Self {
        let mut registers = RiscvRegisters::new();
        registers.set_named("sp", 0x20).unwrap();
        registers.set_named("t0", 7).unwrap();
        registers.set_named("a0", DEFAULT_MEMORY_BASE).unwrap();

        let mut memory = PhysicalMemory::new(0, 64);
        memory.load_words(0, &[0x10, 0x2a]).unwrap();
        memory.load_words(0x10, &[0x20]).unwrap();
        memory.load_words(0x20, &[0xdead_beef]).unwrap();

        Self { registers, memory }
    }

    fn context(&self) -> EvalContext<'_> {
        EvalContext::new(&self.registers, &self.memory)
    }

    fn eval(&self, text: &str) -> Result<Word, ExprError> {
        expr(text, &self.context())
    }
}

fn strict_engine() -> ExprEngine {
    ExprEngine::with_preferences(
        LexicalPreferences {
            max_token_text_length: 31,
            overlong_token_policy: OverlongTokenPolicy::Reject,
            log_rule_matches: false,
        },
        EvaluationPreferences {
            unresolved_register_policy: UnresolvedRegisterPolicy::Error,
            log_evaluation_steps: false,
        },
    )
    .unwrap()
}

#[test]
fn test_precedence() {
    let machine = Machine::new();
    assert_eq!(machine.eval("1+2*3").unwrap(), 7);
    assert_eq!(machine.eval("(1+2)*3").unwrap(), 9);
    assert_eq!(machine.eval("1 + 2 == 3").unwrap(), 1);
}

#[test]
fn test_left_associativity() {
    let machine = Machine::new();
    assert_eq!(machine.eval("8-3-2").unwrap(), 3);
    assert_eq!(machine.eval("8/4/2").unwrap(), 1);
    assert_eq!(machine.eval("100 / 10 * 2").unwrap(), 20);
}

#[test]
fn test_unary_operators() {
    let machine = Machine::new();
    assert_eq!(machine.eval("-3+5").unwrap(), 2);
    assert_eq!(machine.eval("2*3").unwrap(), 6);
    assert_eq!(machine.eval("*0").unwrap(), 0x10);
    assert_eq!(machine.eval("*4 - 2").unwrap(), 0x28);
    assert_eq!(machine.eval("**0").unwrap(), 0x20);
    assert_eq!(machine.eval("***0").unwrap(), 0xdead_beef);
    assert_eq!(machine.eval("-1").unwrap(), Word::MAX);
}

#[test]
fn test_logical_operators() {
    let machine = Machine::new();
    assert_eq!(machine.eval("1==1&&0").unwrap(), 0);
    assert_eq!(machine.eval("1||0&&0").unwrap(), 1);
    assert_eq!(machine.eval("3 != 4 && 5").unwrap(), 1);
}

#[test]
fn test_literals_and_registers() {
    let machine = Machine::new();
    assert_eq!(machine.eval("0x10").unwrap(), 16);
    assert_eq!(machine.eval("0XfF").unwrap(), 255);
    assert_eq!(machine.eval("$t0").unwrap(), 7);
    assert_eq!(machine.eval("*$sp").unwrap(), 0xdead_beef);
    assert_eq!(machine.eval("$a0 == 0x80000000").unwrap(), 1);
    assert_eq!(machine.eval("$0 + 1").unwrap(), 1);
}

#[test]
fn test_structural_errors() {
    let machine = Machine::new();
    assert_matches!(
        machine.eval("(1+2"),
        Err(ExprError::Evaluation(EvalError::UnbalancedParentheses { position: 0 }))
    );
    assert_matches!(
        machine.eval("1+"),
        Err(ExprError::Evaluation(EvalError::EmptyOperand { .. }))
    );
    assert_matches!(machine.eval(""), Err(ExprError::Evaluation(EvalError::EmptyOperand { .. })));
    assert_matches!(
        machine.eval("1 2"),
        Err(ExprError::Evaluation(EvalError::MalformedExpression { .. }))
    );
}

#[test]
fn test_runtime_errors() {
    let machine = Machine::new();
    assert_matches!(
        machine.eval("5/0"),
        Err(ExprError::Evaluation(EvalError::DivisionByZero { .. }))
    );
    assert_matches!(
        machine.eval("*0x1000"),
        Err(ExprError::Evaluation(EvalError::UnreadableAddress { address: 0x1000, .. }))
    );
    assert_matches!(
        machine.eval("0 - 0 + 0x100 1"),
        Err(ExprError::Evaluation(EvalError::MalformedExpression { .. }))
    );
}

#[test]
fn test_lexical_errors() {
    let machine = Machine::new();
    assert_matches!(
        machine.eval("3 % 2"),
        Err(ExprError::LexicalAnalysis(LexerError::NoMatchingRule { position: 2, .. }))
    );
    assert_matches!(
        machine.eval("$x9"),
        Err(ExprError::LexicalAnalysis(LexerError::NoMatchingRule { position: 0, .. }))
    );
}

#[test]
fn test_unresolved_register_in_embedded_mode() {
    let registers = RiscvRegisters::embedded();
    let memory = PhysicalMemory::new(0, 16);
    let context = EvalContext::new(&registers, &memory);

    assert_matches!(
        strict_engine().evaluate("$s11", &context),
        Err(ExprError::Evaluation(EvalError::UnresolvedRegister { .. }))
    );
    assert_eq!(strict_engine().evaluate("$a5 + 1", &context).unwrap(), 1);
}

#[cfg(not(feature = "isa64"))]
#[test]
fn test_literal_out_of_range() {
    let machine = Machine::new();
    assert_matches!(
        machine.eval("4294967296"),
        Err(ExprError::Evaluation(EvalError::LiteralOutOfRange { .. }))
    );
    assert_eq!(machine.eval("4294967295 + 1").unwrap(), 0);
}

#[test]
fn test_outer_parentheses_do_not_change_result() {
    let machine = Machine::new();
    let expressions = [
        "1+2*3",
        "8-3-2",
        "-3+5",
        "*0 == 16",
        "$t0 * (2 + $sp)",
        "1||0&&0",
        "(1)+(2)",
    ];

    for text in expressions {
        let wrapped = format!("({})", text);
        assert_eq!(
            machine.eval(text).unwrap(),
            machine.eval(&wrapped).unwrap(),
            "{} vs {}",
            text,
            wrapped
        );
    }
}

#[test]
fn test_long_flat_chains() {
    let machine = Machine::new();
    let sum = vec!["1"; 300].join("+");
    assert_eq!(machine.eval(&sum).unwrap(), 300);

    let nested = format!("{}1{}", "(".repeat(300), ")".repeat(300));
    assert_matches!(
        machine.eval(&nested),
        Err(ExprError::Evaluation(EvalError::ExpressionTooDeep { .. }))
    );
}

#[test]
fn test_flag_interface() {
    let machine = Machine::new();
    assert_eq!(expr_with_flag("1+1", &machine.context()), (2, true));
    assert_eq!(expr_with_flag("5/0", &machine.context()), (0, false));
}

#[test]
fn test_detailed_result() {
    let machine = Machine::new();
    let result = strict_engine()
        .evaluate_detailed("-*0 + 1", &machine.context())
        .unwrap();

    assert_eq!(result.value, (0x10 as Word).wrapping_neg().wrapping_add(1));
    assert_eq!(result.disambiguation.negations, 1);
    assert_eq!(result.disambiguation.dereferences, 1);
    assert_eq!(result.token_count(), 5);
}
