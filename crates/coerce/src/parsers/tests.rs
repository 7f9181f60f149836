use std::sync::Arc;

use pretty_assertions::assert_eq;
use regex::Regex;
use rstest::rstest;

use crate::{
	CollectionKind, EnumShape, EnumValue, PRIMARY_DELIMITER, ParserRegistry, SECONDARY_DELIMITER,
	Shape, TypeDescriptor, Value,
};
use super::EnumParser;

const COLORS: EnumShape = EnumShape {
	name: "Color",
	variants: &["Red", "Green", "Blue"],
};

fn parse(shape: Shape, raw: &str) -> Option<Value> {
	ParserRegistry::global().parse(Some(raw), &TypeDescriptor::new(shape), None)
}

fn parse_with(descriptor: TypeDescriptor, raw: &str) -> Option<Value> {
	ParserRegistry::global().parse(Some(raw), &descriptor, None)
}

fn ints(values: &[i32]) -> Value {
	Value::Array(values.iter().copied().map(Value::I32).collect())
}

fn strings(values: &[&str]) -> Value {
	Value::Array(values.iter().copied().map(Value::from).collect())
}

#[rstest]
#[case("Y", Some(true))]
#[case("yes", Some(true))]
#[case("ON", Some(true))]
#[case("1", Some(true))]
#[case("True", Some(true))]
#[case("n", Some(false))]
#[case("No", Some(false))]
#[case("off", Some(false))]
#[case("0", Some(false))]
#[case("FALSE", Some(false))]
#[case("maybe", None)]
#[case("", None)]
fn bool_words(#[case] raw: &str, #[case] expected: Option<bool>) {
	assert_eq!(parse(Shape::Bool, raw), expected.map(Value::Bool));
}

#[test]
fn unrecognized_bool_keeps_default() {
	let value = ParserRegistry::global().parse(
		Some("maybe"),
		&TypeDescriptor::new(Shape::Bool),
		Some(Value::Bool(true)),
	);
	assert_eq!(value, Some(Value::Bool(true)));
}

#[test]
fn absent_raw_always_yields_default() {
	let registry = ParserRegistry::global();
	for shape in [
		Shape::I32,
		Shape::String,
		Shape::array(Shape::I32),
		Shape::Collection(CollectionKind::List),
	] {
		assert_eq!(
			registry.parse(None, &TypeDescriptor::new(shape), Some(Value::I32(5))),
			Some(Value::I32(5))
		);
	}
}

#[rstest]
#[case::max("9223372036854775807", Some(i64::MAX))]
#[case::min("-9223372036854775808", Some(i64::MIN))]
#[case::above_max("9223372036854775808", None)]
#[case::below_min("-9223372036854775809", None)]
#[case::too_many_digits("123456789012345678901234", None)]
#[case::zero_padded_max("0009223372036854775807", Some(i64::MAX))]
#[case::underscores("1_000", Some(1000))]
#[case::spaces(" 1 000 ", Some(1000))]
#[case::phone("880-555-35-35", Some(8_805_553_535))]
#[case::nbsp("1&nbsp;000", Some(1000))]
#[case::lone_minus("-", None)]
#[case::empty("", None)]
#[case::plus_sign("+5", None)]
#[case::trailing_garbage("12a", None)]
#[case::decimal("1.5", None)]
#[case::non_ascii_digits("١٢", None)]
fn i64_literals(#[case] raw: &str, #[case] expected: Option<i64>) {
	assert_eq!(parse(Shape::I64, raw), expected.map(Value::I64));
}

#[rstest]
#[case::zero_padded_i8(Shape::I8, "0042", Some(Value::I8(42)))]
#[case::zero_padded_u16(Shape::U16, "000080", Some(Value::U16(80)))]
#[case::zero_padded_i32(Shape::I32, "00000000001", Some(Value::I32(1)))]
#[case::zero_padded_negative(Shape::I8, "-000128", Some(Value::I8(-128)))]
#[case::zero_padded_overflow(Shape::U8, "000256", None)]
#[case(Shape::U8, "255", Some(Value::U8(255)))]
#[case(Shape::U8, "256", None)]
#[case(Shape::U8, "-5", None)]
#[case(Shape::I8, "-128", Some(Value::I8(-128)))]
#[case(Shape::I8, "128", None)]
#[case(Shape::I16, "32767", Some(Value::I16(32767)))]
#[case(Shape::U16, "65536", None)]
#[case(Shape::I32, "-2147483648", Some(Value::I32(i32::MIN)))]
#[case(Shape::U32, "4294967295", Some(Value::U32(u32::MAX)))]
#[case(Shape::U64, "18446744073709551615", Some(Value::U64(u64::MAX)))]
#[case(Shape::U64, "18446744073709551616", None)]
fn integer_widths_are_bounds_checked(
	#[case] shape: Shape,
	#[case] raw: &str,
	#[case] expected: Option<Value>,
) {
	assert_eq!(parse(shape, raw), expected);
}

#[rstest]
#[case("3.25", Some(3.25))]
#[case("-0.5", Some(-0.5))]
#[case("1_000.5", Some(1000.5))]
#[case("42", Some(42.0))]
#[case(".5", None)]
#[case("1.2.3", None)]
#[case("1e5", None)]
#[case("NaN", None)]
fn f64_literals(#[case] raw: &str, #[case] expected: Option<f64>) {
	assert_eq!(parse(Shape::F64, raw), expected.map(Value::F64));
}

#[test]
fn f32_overflow_is_rejected() {
	let huge = format!("1{}", "0".repeat(40));
	assert_eq!(parse(Shape::F32, &huge), None);
	assert_eq!(parse(Shape::F32, "1.5"), Some(Value::F32(1.5)));
}

#[test]
fn strings_are_normalized() {
	assert_eq!(
		parse(Shape::String, "  C:\\games\\save&nbsp;dir "),
		Some(Value::from("C:/games/save ;dir"))
	);
	assert_eq!(parse(Shape::String, "a\0b"), Some(Value::from("a b")));
}

#[test]
fn paths_are_kept_verbatim() {
	assert_eq!(
		parse(Shape::Path, "data\\maps"),
		Some(Value::Path("data\\maps".into()))
	);
}

#[test]
fn pattern_compile_failure_yields_default() {
	let Some(Value::Pattern(pattern)) = parse(Shape::Pattern, "^a+b$") else {
		panic!("expected a pattern");
	};
	assert!(pattern.is_match("aaab"));
	assert_eq!(parse(Shape::Pattern, "(unclosed"), None);
}

#[rstest]
#[case::by_name("green", Some(1))]
#[case::by_name_upper("BLUE", Some(2))]
#[case::by_ordinal("0", Some(0))]
#[case::ordinal_out_of_range("7", None)]
#[case::negative_ordinal("-1", None)]
#[case::unknown_name("purple", None)]
#[case::padded_ordinal(" 2 ", Some(2))]
#[case::separated_digits("0-1", None)]
#[case::grouped_digits("1_0", None)]
fn enum_constants(#[case] raw: &str, #[case] ordinal: Option<usize>) {
	let expected = ordinal.map(|ordinal| {
		Value::Enum(EnumValue {
			ordinal,
			name: COLORS.variants[ordinal],
		})
	});
	assert_eq!(parse(Shape::Enum(COLORS), raw), expected);
}

#[test]
fn enum_ordinal_needs_no_integer_parser() {
	let mut registry = ParserRegistry::empty();
	registry.register(None, Arc::new(EnumParser), false);
	let descriptor = TypeDescriptor::new(Shape::Enum(COLORS));
	assert_eq!(
		registry.parse(Some("2"), &descriptor, None),
		Some(Value::Enum(EnumValue {
			ordinal: 2,
			name: "Blue",
		}))
	);
}

#[test]
fn array_of_ints() {
	assert_eq!(parse(Shape::array(Shape::I32), "1;2;3"), Some(ints(&[1, 2, 3])));
	assert_eq!(parse(Shape::array(Shape::I32), ""), Some(ints(&[])));
}

#[test]
fn primitive_array_drops_bad_elements() {
	assert_eq!(parse(Shape::array(Shape::I32), "1;x;;3"), Some(ints(&[1, 3])));
}

#[test]
fn nullable_array_keeps_null_slots() {
	assert_eq!(
		parse(Shape::array(Shape::optional(Shape::I32)), "1;x;3"),
		Some(Value::Array(vec![Value::I32(1), Value::Null, Value::I32(3)]))
	);
}

#[test]
fn array_honors_custom_delimiter() {
	let descriptor = TypeDescriptor::new(Shape::array(Shape::String))
		.with_attribute(&PRIMARY_DELIMITER, Regex::new(r"\s*,\s*").unwrap());
	assert_eq!(
		parse_with(descriptor, "red , green,blue"),
		Some(strings(&["red", "green", "blue"]))
	);
}

#[test]
fn array_of_enums() {
	let value = parse(Shape::array(Shape::Enum(COLORS)), "red;2").unwrap();
	let names: Vec<_> = value
		.elements()
		.unwrap()
		.into_iter()
		.map(|v| match v {
			Value::Enum(e) => e.name,
			other => panic!("unexpected {other:?}"),
		})
		.collect();
	assert_eq!(names, ["Red", "Blue"]);
}

#[test]
fn matrix_rows_are_ragged() {
	assert_eq!(
		parse(Shape::array(Shape::array(Shape::String)), "a=1;b=2=3"),
		Some(Value::Array(vec![strings(&["a", "1"]), strings(&["b", "2", "3"])]))
	);
}

#[test]
fn matrix_of_ints_drops_bad_cells() {
	assert_eq!(
		parse(Shape::array(Shape::array(Shape::I32)), "1=x;2"),
		Some(Value::Array(vec![ints(&[1]), ints(&[2])]))
	);
}

#[test]
fn empty_matrix_has_no_rows() {
	assert_eq!(
		parse(Shape::array(Shape::array(Shape::I32)), ""),
		Some(Value::Array(Vec::new()))
	);
}

#[test]
fn matrix_honors_both_delimiters() {
	let descriptor = TypeDescriptor::new(Shape::array(Shape::array(Shape::U16)))
		.with_attribute(&PRIMARY_DELIMITER, Regex::new(r"\|").unwrap())
		.with_attribute(&SECONDARY_DELIMITER, Regex::new(":").unwrap());
	assert_eq!(
		parse_with(descriptor, "1:2|3"),
		Some(Value::Array(vec![
			Value::Array(vec![Value::U16(1), Value::U16(2)]),
			Value::Array(vec![Value::U16(3)]),
		]))
	);
}

#[test]
fn three_dimensional_array_is_unsupported() {
	let shape = Shape::array(Shape::array(Shape::array(Shape::I32)));
	assert_eq!(parse(shape, "1=2;3"), None);
}

#[test]
fn set_of_strings_deduplicates() {
	let descriptor =
		TypeDescriptor::with_generics(Shape::Collection(CollectionKind::Set), [Shape::String]);
	let Some(Value::Set(set)) = parse_with(descriptor, "a;b;a") else {
		panic!("expected a set");
	};
	assert_eq!(set.len(), 2);
	assert_eq!(
		set.into_iter().collect::<Vec<_>>(),
		vec![Value::from("a"), Value::from("b")]
	);
}

#[rstest]
#[case::any(CollectionKind::Any)]
#[case::list(CollectionKind::List)]
#[case::concrete_vec(CollectionKind::Concrete("vec"))]
fn list_like_collections_become_lists(#[case] kind: CollectionKind) {
	let descriptor = TypeDescriptor::with_generics(Shape::Collection(kind), [Shape::U8]);
	assert_eq!(
		parse_with(descriptor, "1;2;2"),
		Some(Value::List(vec![Value::U8(1), Value::U8(2), Value::U8(2)]))
	);
}

#[test]
fn queue_keeps_order() {
	let descriptor =
		TypeDescriptor::with_generics(Shape::Collection(CollectionKind::Queue), [Shape::I64]);
	let Some(Value::Queue(queue)) = parse_with(descriptor, "3;1;2") else {
		panic!("expected a queue");
	};
	assert_eq!(queue.front(), Some(&Value::I64(3)));
	assert_eq!(queue.len(), 3);
}

#[test]
fn unknown_concrete_collection_yields_default() {
	let descriptor = TypeDescriptor::with_generics(
		Shape::Collection(CollectionKind::Concrete("linked_list")),
		[Shape::String],
	);
	assert_eq!(parse_with(descriptor, "a;b"), None);
}

#[test]
fn collection_without_generics_reads_strings() {
	assert_eq!(
		parse(Shape::Collection(CollectionKind::List), "x;y"),
		Some(Value::List(vec![Value::from("x"), Value::from("y")]))
	);
}

#[test]
fn empty_collection_is_empty() {
	let descriptor =
		TypeDescriptor::with_generics(Shape::Collection(CollectionKind::List), [Shape::I32]);
	assert_eq!(parse_with(descriptor, ""), Some(Value::List(Vec::new())));
}

#[test]
fn collection_of_nullable_elements() {
	let descriptor = TypeDescriptor::with_generics(
		Shape::Collection(CollectionKind::List),
		[Shape::optional(Shape::Bool)],
	);
	assert_eq!(
		parse_with(descriptor, "yes;perhaps"),
		Some(Value::List(vec![Value::Bool(true), Value::Null]))
	);
}
