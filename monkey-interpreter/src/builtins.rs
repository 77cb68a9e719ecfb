use std::rc::Rc;

use crate::object::{Builtin, EvaluationError, Object, ObjectType};

/// Native functions, consulted after the environment chain misses.
pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        func: builtin_len,
    },
    Builtin {
        name: "first",
        func: builtin_first,
    },
    Builtin {
        name: "last",
        func: builtin_last,
    },
    Builtin {
        name: "rest",
        func: builtin_rest,
    },
    Builtin {
        name: "push",
        func: builtin_push,
    },
    Builtin {
        name: "puts",
        func: builtin_puts,
    },
];

pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name).copied()
}

fn check_argument_count(args: &[Rc<Object>], want: usize) -> Result<(), EvaluationError> {
    if args.len() != want {
        return Err(EvaluationError::WrongArgumentCount {
            got: args.len(),
            want,
        });
    }
    Ok(())
}

fn expect_array<'a>(
    function: &'static str,
    arg: &'a Object,
) -> Result<&'a [Rc<Object>], EvaluationError> {
    match arg {
        Object::Array(arr) => Ok(arr.as_slice()),
        other => Err(EvaluationError::WrongArgumentType {
            function,
            expected: ObjectType::Array,
            got: other.type_of(),
        }),
    }
}

fn builtin_len(args: &[Rc<Object>]) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count(args, 1)?;
    match args[0].as_ref() {
        // Byte length, not character count.
        Object::String(s) => Ok(Object::integer(s.len() as i64)),
        Object::Array(arr) => Ok(Object::integer(arr.len() as i64)),
        other => Err(EvaluationError::UnsupportedArgument {
            function: "len",
            got: other.type_of(),
        }),
    }
}

fn builtin_first(args: &[Rc<Object>]) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count(args, 1)?;
    let arr = expect_array("first", &args[0])?;
    Ok(arr.first().cloned().unwrap_or_else(Object::null))
}

fn builtin_last(args: &[Rc<Object>]) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count(args, 1)?;
    let arr = expect_array("last", &args[0])?;
    Ok(arr.last().cloned().unwrap_or_else(Object::null))
}

fn builtin_rest(args: &[Rc<Object>]) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count(args, 1)?;
    let arr = expect_array("rest", &args[0])?;
    if arr.is_empty() {
        return Ok(Object::null());
    }
    Ok(Object::array(arr[1..].to_vec()))
}

fn builtin_push(args: &[Rc<Object>]) -> Result<Rc<Object>, EvaluationError> {
    check_argument_count(args, 2)?;
    let arr = expect_array("push", &args[0])?;
    let mut new_arr = arr.to_vec();
    new_arr.push(args[1].clone());
    Ok(Object::array(new_arr))
}

fn builtin_puts(args: &[Rc<Object>]) -> Result<Rc<Object>, EvaluationError> {
    for arg in args {
        println!("{}", arg);
    }
    Ok(Object::null())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len() {
        let no_arguments = builtin_len(&[]);
        assert_eq!(
            no_arguments,
            Err(EvaluationError::WrongArgumentCount { got: 0, want: 1 })
        );

        let too_many_arguments = builtin_len(&[
            Object::string("hello".to_owned()),
            Object::string("world".to_owned()),
        ]);
        assert_eq!(
            too_many_arguments.unwrap_err().to_string(),
            "wrong number of arguments. got=2, want=1"
        );

        let empty_array = builtin_len(&[Object::array(vec![])]);
        assert_eq!(empty_array, Ok(Object::integer(0)));

        let two_elements = builtin_len(&[Object::array(vec![
            Object::string("hello".to_owned()),
            Object::string("world".to_owned()),
        ])]);
        assert_eq!(two_elements, Ok(Object::integer(2)));

        let string_len = builtin_len(&[Object::string("hello".to_owned())]);
        assert_eq!(string_len, Ok(Object::integer(5)));

        let integer_len = builtin_len(&[Object::integer(42)]);
        assert_eq!(
            integer_len.unwrap_err().to_string(),
            "argument to `len` not supported, got INTEGER"
        );
    }

    #[test]
    fn test_array_functions() {
        let arr = Object::array(vec![
            Object::integer(1),
            Object::integer(2),
            Object::integer(3),
        ]);
        let empty = Object::array(vec![]);

        assert_eq!(builtin_first(&[arr.clone()]), Ok(Object::integer(1)));
        assert_eq!(builtin_last(&[arr.clone()]), Ok(Object::integer(3)));
        assert_eq!(
            builtin_rest(&[arr.clone()]),
            Ok(Object::array(vec![Object::integer(2), Object::integer(3)]))
        );
        assert_eq!(builtin_first(&[empty.clone()]), Ok(Object::null()));
        assert_eq!(builtin_last(&[empty.clone()]), Ok(Object::null()));
        assert_eq!(builtin_rest(&[empty.clone()]), Ok(Object::null()));

        assert_eq!(
            builtin_push(&[empty.clone(), Object::integer(1)]),
            Ok(Object::array(vec![Object::integer(1)]))
        );
        // push returns a new array
        assert_eq!(empty.as_ref(), &Object::Array(vec![]));

        assert_eq!(
            builtin_first(&[Object::integer(1)])
                .unwrap_err()
                .to_string(),
            "argument to `first` must be ARRAY, got INTEGER"
        );
        assert_eq!(
            builtin_push(&[arr]).unwrap_err(),
            EvaluationError::WrongArgumentCount { got: 1, want: 2 }
        );
    }

    #[test]
    fn test_puts_returns_null() {
        assert_eq!(builtin_puts(&[]), Ok(Object::null()));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("len").map(|builtin| builtin.name), Some("len"));
        assert!(lookup("nope").is_none());
    }
}
