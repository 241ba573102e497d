//! Calculator tool definition.
//!
//! Basic IEEE double-precision arithmetic on two operands.

use tracing::{debug, instrument};

use crate::domains::tools::handlers::{Arguments, ToolHandler, ToolResult, number_or_zero};
use crate::domains::tools::schema::{InputSchema, ParamSchema, ParamType, ToolDefinition};
use crate::domains::tools::ToolError;

// ============================================================================
// Operations
// ============================================================================

/// Operations understood by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Sqrt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Sqrt => "sqrt",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Apply the operation, or explain why it is not allowed.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, &'static str> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide if b == 0.0 => Err("Division by zero is not allowed"),
            Self::Divide => Ok(a / b),
            Self::Power => Ok(a.powf(b)),
            Self::Sqrt if a < 0.0 => Err("Square root of negative number is not allowed"),
            Self::Sqrt => Ok(a.sqrt()),
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Calculator tool - add, subtract, multiply, divide, power and sqrt.
pub struct CalculatorTool;

impl CalculatorTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calculator";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Perform mathematical calculations";

    /// Metadata advertised to clients.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            Self::DESCRIPTION,
            InputSchema::new()
                .param(
                    ParamSchema::required("operation", ParamType::String)
                        .one_of(Operation::ALL.map(Operation::as_str))
                        .describe("Mathematical operation to perform"),
                )
                .param(ParamSchema::required("a", ParamType::Number).describe("First number"))
                .param(
                    ParamSchema::optional("b", ParamType::Number)
                        .describe("Second number (not required for sqrt)"),
                ),
        )
    }
}

impl ToolHandler for CalculatorTool {
    #[instrument(name = "calculator", skip_all)]
    fn call(&self, arguments: &Arguments) -> Result<ToolResult, ToolError> {
        // Operands are coerced before the operation is looked at, so a bad
        // operand is reported even for an unknown operation.
        let a = number_or_zero(arguments, "a")?;
        let b = number_or_zero(arguments, "b")?;

        let name = match arguments.get("operation") {
            None | Some(serde_json::Value::Null) => {
                return Err(ToolError::missing_argument("operation"));
            }
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        let Some(operation) = Operation::parse(&name) else {
            return Ok(ToolResult::failure(format!("Unknown operation: {name}")));
        };

        debug!(operation = operation.as_str(), a, b, "Evaluating");

        Ok(match operation.apply(a, b) {
            Ok(value) => ToolResult::text(format!("Result: {value}")),
            Err(reason) => ToolResult::failure(reason),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(args: serde_json::Value) -> Result<ToolResult, ToolError> {
        CalculatorTool.call(args.as_object().unwrap())
    }

    #[test]
    fn test_add() {
        let result = run(json!({ "operation": "add", "a": 2, "b": 3 })).unwrap();
        assert_eq!(result.first_text(), Some("Result: 5"));
    }

    #[test]
    fn test_power() {
        let result = run(json!({ "operation": "power", "a": 2, "b": 10 })).unwrap();
        assert_eq!(result.first_text(), Some("Result: 1024"));
    }

    #[test]
    fn test_fractional_result() {
        let result = run(json!({ "operation": "divide", "a": 5, "b": 2 })).unwrap();
        assert_eq!(result.first_text(), Some("Result: 2.5"));
    }

    #[test]
    fn test_divide_by_zero() {
        let result = run(json!({ "operation": "divide", "a": 4, "b": 0 })).unwrap();
        assert_eq!(result.error(), Some("Division by zero is not allowed"));
    }

    #[test]
    fn test_divide_with_missing_b_defaults_to_zero() {
        let result = run(json!({ "operation": "divide", "a": 4 })).unwrap();
        assert_eq!(result.error(), Some("Division by zero is not allowed"));
    }

    #[test]
    fn test_sqrt() {
        let result = run(json!({ "operation": "sqrt", "a": 9 })).unwrap();
        assert_eq!(result.first_text(), Some("Result: 3"));

        let result = run(json!({ "operation": "sqrt", "a": -1 })).unwrap();
        assert_eq!(
            result.error(),
            Some("Square root of negative number is not allowed")
        );
    }

    #[test]
    fn test_missing_operands_are_zero() {
        let result = run(json!({ "operation": "subtract" })).unwrap();
        assert_eq!(result.first_text(), Some("Result: 0"));
    }

    #[test]
    fn test_unknown_operation() {
        let result = run(json!({ "operation": "mod", "a": 5, "b": 2 })).unwrap();
        assert_eq!(result.error(), Some("Unknown operation: mod"));
    }

    #[test]
    fn test_missing_operation_is_a_fault() {
        let err = run(json!({ "a": 1 })).unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(_)));
    }

    #[test]
    fn test_non_numeric_operand_is_a_fault() {
        let err = run(json!({ "operation": "add", "a": "two", "b": 1 })).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_numeric_string_operand() {
        let result = run(json!({ "operation": "multiply", "a": "1.5", "b": 4 })).unwrap();
        assert_eq!(result.first_text(), Some("Result: 6"));
    }

    #[test]
    fn test_definition_lists_all_operations() {
        let definition = CalculatorTool::definition();
        let schema = serde_json::to_value(&definition.input_schema).unwrap();
        assert_eq!(
            schema["properties"]["operation"]["enum"],
            json!(["add", "subtract", "multiply", "divide", "power", "sqrt"])
        );
        assert_eq!(schema["required"], json!(["operation", "a"]));
        assert_eq!(schema["properties"]["b"]["optional"], json!(true));
    }
}
