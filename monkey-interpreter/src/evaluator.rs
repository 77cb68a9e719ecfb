use std::rc::Rc;

use monkey_core::ast;
use monkey_core::ast::Expression;
use rustc_hash::FxHashMap;

use crate::builtins;
use crate::environment::Environment;
use crate::object::{EvaluationError, HashPair, Object, QuickReturn};

/// Evaluates a whole program against `environment`.
///
/// A top-level `return` ends the program with its value. A failure is
/// reported as an [`Object::Error`] rather than a Rust error so the caller
/// can display it like any other result.
pub fn eval_program(program: &ast::Program, environment: &Environment) -> Rc<Object> {
    match eval_statements(&program.statements, environment) {
        Ok(object) => object,
        Err(QuickReturn::Return(value)) => value,
        Err(QuickReturn::Error(error)) => {
            tracing::debug!(%error, "evaluation failed");
            Object::error(error)
        }
    }
}

fn eval_statements(
    statements: &[ast::Statement],
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let mut result = Object::null();
    for statement in statements {
        result = eval_statement(statement, environment)?;
    }
    Ok(result)
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match statement {
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
        ast::Statement::Return(statement) => eval_return_statement(statement, environment),
        ast::Statement::Let(statement) => eval_let_statement(statement, environment),
    }
}

fn eval_let_statement(
    statement: &ast::LetStatement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    environment.set(statement.identifier.name.clone(), value);
    Ok(Object::null())
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    Err(QuickReturn::Return(value))
}

fn eval_expression(
    expression: &Expression,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::StringLiteral(value) => Ok(Object::string(value.clone())),
        Expression::ArrayLiteral(array) => Ok(Object::array(eval_expressions(array, environment)?)),
        Expression::HashLiteral(literal) => eval_hash_literal(literal, environment),
        Expression::Identifier(identifier) => eval_identifier(identifier, environment),
        Expression::PrefixOperation(kind, right) => {
            let right = eval_expression(right, environment)?;
            eval_prefix_operation(*kind, right)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment)?;
            let right = eval_expression(right, environment)?;
            eval_infix_operation(*kind, left, right)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if condition.is_truthy() {
                eval_statements(&consequence.statements, environment)
            } else if let Some(alternative) = alternative {
                eval_statements(&alternative.statements, environment)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral(literal) => {
            Ok(Object::function(Rc::clone(literal), environment.clone()))
        }
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let function = eval_expression(function, environment)?;
            let arguments = eval_expressions(arguments, environment)?;
            apply_function(&function, arguments)
        }
        Expression::IndexExpression { left, index } => {
            let left = eval_expression(left, environment)?;
            let index = eval_expression(index, environment)?;
            eval_index_expression(left, index)
        }
    }
}

fn eval_identifier(
    identifier: &ast::Identifier,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    if let Some(value) = environment.get(&identifier.name) {
        return Ok(value);
    }
    match builtins::lookup(&identifier.name) {
        Some(builtin) => Ok(Object::builtin(builtin)),
        None => Err(EvaluationError::IdentifierNotFound(identifier.name.clone()).into()),
    }
}

fn eval_expressions(
    expressions: &[Expression],
    environment: &Environment,
) -> Result<Vec<Rc<Object>>, QuickReturn> {
    let mut result = Vec::with_capacity(expressions.len());
    for expression in expressions {
        result.push(eval_expression(expression, environment)?);
    }
    Ok(result)
}

fn eval_hash_literal(
    literal: &[(Expression, Expression)],
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let mut hashmap = FxHashMap::default();
    for (key, value) in literal {
        let key = eval_expression(key, environment)?;
        let hashed_key = key
            .hash_key()
            .ok_or_else(|| EvaluationError::UnusableAsHashKey(key.type_of()))?;
        let value = eval_expression(value, environment)?;
        hashmap.insert(hashed_key, HashPair { key, value });
    }
    Ok(Object::hash(hashmap))
}

fn apply_function(
    function: &Rc<Object>,
    arguments: Vec<Rc<Object>>,
) -> Result<Rc<Object>, QuickReturn> {
    match function.as_ref() {
        Object::Function(function) => {
            let parameters = &function.literal.parameters;
            if parameters.len() != arguments.len() {
                return Err(EvaluationError::WrongArgumentCount {
                    got: arguments.len(),
                    want: parameters.len(),
                }
                .into());
            }

            let new_environment = Environment::new_enclosed(&function.env);
            for (parameter, argument) in parameters.iter().zip(arguments) {
                new_environment.set(parameter.name.clone(), argument);
            }
            tracing::trace!(
                arity = parameters.len(),
                depth = new_environment.depth(),
                "applying function"
            );

            // `return` stops here; errors keep unwinding.
            match eval_statements(&function.literal.body.statements, &new_environment) {
                Ok(object) | Err(QuickReturn::Return(object)) => Ok(object),
                Err(error) => Err(error),
            }
        }
        Object::Builtin(builtin) => {
            tracing::trace!(builtin = builtin.name, "calling builtin");
            Ok((builtin.func)(&arguments)?)
        }
        other => Err(EvaluationError::NotAFunction(other.type_of()).into()),
    }
}

fn eval_prefix_operation(
    kind: ast::PrefixOperationKind,
    right: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    match (kind, right.as_ref()) {
        (ast::PrefixOperationKind::Bang, _) => Ok(Object::boolean(!right.is_truthy())),
        (ast::PrefixOperationKind::Minus, Object::Integer(value)) => {
            Ok(Object::integer(value.wrapping_neg()))
        }
        (ast::PrefixOperationKind::Minus, _) => Err(EvaluationError::UnknownPrefixOperator {
            operation: kind,
            right: right.type_of(),
        }
        .into()),
    }
}

fn eval_infix_operation(
    kind: ast::InfixOperationKind,
    left: Rc<Object>,
    right: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    use ast::InfixOperationKind;
    match (left.as_ref(), right.as_ref()) {
        (Object::Integer(l), Object::Integer(r)) => Ok(eval_integer_infix_operation(kind, *l, *r)?),
        (Object::String(l), Object::String(r)) => match kind {
            InfixOperationKind::Plus => Ok(Object::string(format!("{}{}", l, r))),
            InfixOperationKind::Equal => Ok(Object::boolean(l == r)),
            InfixOperationKind::NotEqual => Ok(Object::boolean(l != r)),
            _ => Err(unknown_infix_operator(kind, &left, &right).into()),
        },
        _ if left.type_of() != right.type_of() => Err(EvaluationError::TypeMismatch {
            left: left.type_of(),
            operation: kind,
            right: right.type_of(),
        }
        .into()),
        // Booleans and null are shared instances, so identity is equality.
        _ if kind == InfixOperationKind::Equal => Ok(Object::boolean(Rc::ptr_eq(&left, &right))),
        _ if kind == InfixOperationKind::NotEqual => {
            Ok(Object::boolean(!Rc::ptr_eq(&left, &right)))
        }
        _ => Err(unknown_infix_operator(kind, &left, &right).into()),
    }
}

fn unknown_infix_operator(
    kind: ast::InfixOperationKind,
    left: &Object,
    right: &Object,
) -> EvaluationError {
    EvaluationError::UnknownInfixOperator {
        left: left.type_of(),
        operation: kind,
        right: right.type_of(),
    }
}

fn eval_integer_infix_operation(
    kind: ast::InfixOperationKind,
    left: i64,
    right: i64,
) -> Result<Rc<Object>, EvaluationError> {
    use ast::InfixOperationKind;
    let result = match kind {
        InfixOperationKind::Plus => Object::integer(left.wrapping_add(right)),
        InfixOperationKind::Minus => Object::integer(left.wrapping_sub(right)),
        InfixOperationKind::Multiply => Object::integer(left.wrapping_mul(right)),
        InfixOperationKind::Divide => {
            if right == 0 {
                return Err(EvaluationError::DivisionByZero);
            }
            Object::integer(left.wrapping_div(right))
        }
        InfixOperationKind::LessThan => Object::boolean(left < right),
        InfixOperationKind::GreaterThan => Object::boolean(left > right),
        InfixOperationKind::Equal => Object::boolean(left == right),
        InfixOperationKind::NotEqual => Object::boolean(left != right),
    };
    Ok(result)
}

fn eval_index_expression(left: Rc<Object>, index: Rc<Object>) -> Result<Rc<Object>, QuickReturn> {
    match (left.as_ref(), index.as_ref()) {
        (Object::Array(array), Object::Integer(index)) => Ok(usize::try_from(*index)
            .ok()
            .and_then(|index| array.get(index))
            .cloned()
            .unwrap_or_else(Object::null)),
        (Object::Hash(hash), _) => {
            let hashed_index = index
                .hash_key()
                .ok_or_else(|| EvaluationError::UnusableAsHashKey(index.type_of()))?;
            Ok(hash
                .get(&hashed_index)
                .map(|pair| pair.value.clone())
                .unwrap_or_else(Object::null))
        }
        _ => Err(EvaluationError::IndexNotSupported(left.type_of()).into()),
    }
}
