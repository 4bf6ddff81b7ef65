use serde::{Deserialize, Serialize};
use serde_ini::{
    decode, decode_with_options, encode, encode_with_options, from_str, to_string, unsafe_value,
    DecodeOptions, EncodeOptions, IniMap, LineEnding, Value,
};
use serde_json::json;

const EXPECT_E: &str = r#"o=p
a with spaces=b  c
" xa  n          p "="\"\r\nyoyoyo\r\r\n"
"[disturbing]"=hey you never know
s=something
s1="something'
s2=something else
zr[]=deedee
ar[]=one
ar[]=three
ar[]=this is included
br=warm
eq="eq=eq"

[a]
av=a val
e={ o: p, a: { av: a val, b: { c: { e: "this [value]" } } } }
j="\"{ o: \"p\", a: { av: \"a val\", b: { c: { e: \"this [value]\" } } } }\""
"[]"=a square?
cr[]=four
cr[]=eight

[a.b.c]
e=1
j=2

[x\.y\.z]
x.y.z=xyz

[x\.y\.z.a\.b\.c]
a.b.c=abc
nocomment=this\; this is not a comment
noHashComment=this\# this is not a comment
"#;

const EXPECT_F: &str = "[prefix.log]\ntype=file\n\n[prefix.log.level]\nlabel=debug\nvalue=10\n";

const EXPECT_G: &str = "[log]\ntype = file\n\n[log.level]\nlabel = debug\nvalue = 10\n";

/// A hand-written file exercising comments, odd spacing and repeated keys.
const FIXTURE: &str = r#"o = p

   a with spaces   =     b  c

; wrap in quotes to JSON-decode and preserve spaces
" xa  n          p " = "\"\r\nyoyoyo\r\r\n"

; wrap in quotes to get a key with a bracket, not a section.
"[disturbing]" = hey you never know

; Test single quotes
s = 'something'

; Test mixing quotes
s1 = "something'

; Test double quotes
s2 = "something else"

; Test arrays
zr[] = deedee
ar[] = one
ar[] = three
; This should be included in the array
ar   = this is included

; Test resetting of a value (and not turn it into an array)
br = cold
br = warm

eq = "eq=eq"

; a section
[a]
av = a val
e = { o: p, a: { av: a val, b: { c: { e: "this [value]" } } } }
j = "\"{ o: \"p\", a: { av: \"a val\", b: { c: { e: \"this [value]\" } } } }\""
"[]" = a square?

; Nested array
cr[] = four
cr[] = eight

; nested child without middle parent
; should create otherwise-empty a.b
[a.b.c]
e = 1
j = 2

; dots in the section name should be literally interpreted
[x\.y\.z]
x.y.z = xyz

[x\.y\.z.a\.b\.c]
a.b.c = abc

; this next one is not a comment!  it's escaped!
nocomment = this\; this is not a comment

# Support the use of the number sign (#) as an alternative to the semicolon for indicating comments.
# http://en.wikipedia.org/wiki/INI_file#Comments

# this next one is not a comment!  it's escaped!
noHashComment = this\# this is not a comment
"#;

fn expect_d() -> Value {
    serde_json::from_value(json!({
        "o": "p",
        "a with spaces": "b  c",
        " xa  n          p ": "\"\r\nyoyoyo\r\r\n",
        "[disturbing]": "hey you never know",
        "s": "something",
        "s1": "\"something'",
        "s2": "something else",
        "zr": ["deedee"],
        "ar": ["one", "three", "this is included"],
        "br": "warm",
        "eq": "eq=eq",
        "a": {
            "av": "a val",
            "e": "{ o: p, a: { av: a val, b: { c: { e: \"this [value]\" } } } }",
            "j": "\"{ o: \"p\", a: { av: \"a val\", b: { c: { e: \"this [value]\" } } } }\"",
            "[]": "a square?",
            "cr": ["four", "eight"],
            "b": { "c": { "e": "1", "j": "2" } }
        },
        "x.y.z": {
            "x.y.z": "xyz",
            "a.b.c": {
                "a.b.c": "abc",
                "nocomment": "this; this is not a comment",
                "noHashComment": "this# this is not a comment"
            }
        }
    }))
    .unwrap()
}

fn section(value: Value) -> IniMap {
    match value {
        Value::Section(map) => map,
        other => panic!("expected a section, got {:?}", other),
    }
}

fn lf() -> EncodeOptions {
    EncodeOptions::new().with_line_ending(LineEnding::Lf)
}

fn log_doc() -> IniMap {
    section(
        serde_json::from_value(json!({
            "log": { "type": "file", "level": { "label": "debug", "value": 10 } }
        }))
        .unwrap(),
    )
}

#[test]
fn test_decode_fixture() {
    let doc = decode(FIXTURE);
    assert_eq!(Value::Section(doc), expect_d());
}

#[test]
fn test_decode_fixture_with_crlf() {
    let doc = decode(&FIXTURE.replace('\n', "\r\n"));
    assert_eq!(Value::Section(doc), expect_d());
}

#[test]
fn test_decode_encoded_text() {
    assert_eq!(Value::Section(decode(EXPECT_E)), expect_d());
}

#[test]
fn test_decode_inline_arrays() {
    let options = DecodeOptions::new().with_inline_arrays(true);
    let doc = decode_with_options(FIXTURE, &options);

    let mut expected = section(expect_d());
    expected.insert("zr".to_string(), Value::Array(vec![Value::from("deedee")]));
    expected.insert(
        "br".to_string(),
        Value::Array(vec![Value::from("cold"), Value::from("warm")]),
    );
    assert_eq!(doc, expected);
}

#[test]
fn test_encode_from_data() {
    let text = encode_with_options(&section(expect_d()), &lf());
    assert_eq!(text, EXPECT_E);
}

#[test]
fn test_encode_from_data_inline_arrays() {
    let text = encode_with_options(&section(expect_d()), &lf().with_inline_arrays(true));
    let expected = EXPECT_E
        .replace("zr[]=", "zr=")
        .replace("ar[]=", "ar=")
        .replace("cr[]=", "cr=");
    assert_eq!(text, expected);
}

#[test]
fn test_never_blank_first_or_last_line() {
    let eol = LineEnding::native().as_str();
    let text = encode(&log_doc());
    assert!(!text.starts_with(eol));
    assert!(text.ends_with(eol));
    assert!(!text.ends_with(&format!("{eol}{eol}")));
}

#[test]
fn test_encode_with_section_option() {
    let text = encode_with_options(&log_doc(), &lf().with_section("prefix"));
    assert_eq!(text, EXPECT_F);
}

#[test]
fn test_encode_with_string() {
    let options = EncodeOptions::from("prefix").with_line_ending(LineEnding::Lf);
    assert_eq!(encode_with_options(&log_doc(), &options), EXPECT_F);
}

#[test]
fn test_encode_with_whitespace() {
    let text = encode_with_options(&log_doc(), &lf().with_whitespace(true));
    assert_eq!(text, EXPECT_G);
}

#[test]
fn test_array_destructuring() {
    let doc = decode("[x]\ny=1\ny[]=2\n");
    let expected: Value = serde_json::from_value(json!({ "x": { "y": ["1", "2"] } })).unwrap();
    assert_eq!(Value::Section(doc), expected);
}

#[test]
fn test_defaulting_unset_value() {
    let options = DecodeOptions::new().with_default_value(true);
    let doc = decode_with_options("foo\nbar=false\n", &options);
    assert_eq!(doc.get("foo"), Some(&Value::Bool(true)));
    assert_eq!(doc.get("bar"), Some(&Value::Bool(false)));

    let doc = decode("foo\n");
    assert_eq!(doc.get("foo"), Some(&Value::from("")));
}

#[test]
fn test_ignores_invalid_line() {
    let doc = decode("foo=true\n=\nbar=false\n");
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get("foo"), Some(&Value::Bool(true)));
    assert_eq!(doc.get("bar"), Some(&Value::Bool(false)));
}

#[test]
fn test_unsafe_escape_values() {
    assert_eq!(unsafe_value(""), Value::from(""));
    assert_eq!(unsafe_value("x;y"), Value::from("x"));
    assert_eq!(unsafe_value("x  # y"), Value::from("x"));
    assert_eq!(unsafe_value("x \"\\"), Value::from("x \"\\"));
}

#[test]
fn test_encode_decode_roundtrip_fixture() {
    let doc = decode(FIXTURE);
    let text = encode_with_options(&doc, &lf());
    assert_eq!(decode(&text), doc);
}

#[test]
fn test_roundtrip_awkward_keys() {
    let doc = section(
        serde_json::from_value(json!({
            "'": "",
            "\"title": "say \"hi\"",
            "a.b": "flat",
            ".": { "\"": " " },
            "a\\": { "x": "1", "q": { "k": "v" } },
            "x\\.y": { "k": "v" },
            "a": { "b": { "c": "nested" } }
        }))
        .unwrap(),
    );
    let text = encode_with_options(&doc, &lf());
    assert_eq!(decode(&text), doc, "encoded as:\n{}", text);
}

#[test]
fn test_quoted_key_without_equals_after_it() {
    let doc = decode("\"title=say \"hi\"\n");
    assert_eq!(doc.get("\"title"), Some(&Value::from("say \"hi\"")));
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Count {
    count: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Drink {
    drink: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Flag {
    #[serde(rename = "isTrue")]
    is_true: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Dude {
    abides: bool,
    rug_count: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct NestedFlag {
    the_dude: Dude,
}

#[test]
fn test_parse_stringify_typed() {
    let count = Count { count: 10 };
    assert_eq!(from_str::<Count>(&to_string(&count).unwrap()).unwrap(), count);

    let drink = Drink {
        drink: "white russian".to_string(),
    };
    assert_eq!(from_str::<Drink>(&to_string(&drink).unwrap()).unwrap(), drink);

    let flag = Flag { is_true: true };
    assert_eq!(from_str::<Flag>(&to_string(&flag).unwrap()).unwrap(), flag);

    let nested = NestedFlag {
        the_dude: Dude {
            abides: true,
            rug_count: 1,
        },
    };
    let text = to_string(&nested).unwrap();
    assert!(text.contains("[theDude]"));
    assert_eq!(from_str::<NestedFlag>(&text).unwrap(), nested);
}

#[test]
fn test_typed_config_with_lists_and_options() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Remote {
        url: String,
        fetch: Vec<String>,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Repo {
        bare: bool,
        description: Option<String>,
        origin: Remote,
    }

    let text = "\
; repository settings
bare = false

[origin]
url = https://example.com/repo.git
fetch[] = +refs/heads/*:refs/remotes/origin/*
fetch[] = +refs/tags/*:refs/tags/*
";
    let repo: Repo = from_str(text).unwrap();
    assert_eq!(
        repo,
        Repo {
            bare: false,
            description: None,
            origin: Remote {
                url: "https://example.com/repo.git".to_string(),
                fetch: vec![
                    "+refs/heads/*:refs/remotes/origin/*".to_string(),
                    "+refs/tags/*:refs/tags/*".to_string(),
                ],
            },
        }
    );
}
