use bytes::Bytes;
use reply::{Error, HeaderTable, Response, Status, Transport, TransportError, render};
use serde::Serialize;

#[derive(Debug, PartialEq)]
enum Write {
    Status(u16),
    Header(String, String),
    Body(Bytes),
}

#[derive(Default)]
struct Recording(Vec<Write>);

impl Transport for Recording {
    fn write_status(&mut self, code: u16) -> Result<(), TransportError> {
        self.0.push(Write::Status(code));
        Ok(())
    }

    fn write_header(&mut self, name: &str, value: &str) -> Result<(), TransportError> {
        self.0.push(Write::Header(name.to_owned(), value.to_owned()));
        Ok(())
    }

    fn write_body(&mut self, body: Bytes) -> Result<(), TransportError> {
        self.0.push(Write::Body(body));
        Ok(())
    }
}

impl Recording {
    fn of(response: Response) -> Self {
        let mut rec = Self::default();
        render(response, &mut rec).unwrap();
        rec
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        self.0.iter()
            .filter_map(|w| match w {
                Write::Header(n, v) if n == name => Some(v.as_str()),
                _ => None,
            })
            .collect()
    }

    fn body(&self) -> &Bytes {
        self.0.iter()
            .find_map(|w| match w {
                Write::Body(b) => Some(b),
                _ => None,
            })
            .expect("no body written")
    }
}

fn ordered(table: &HeaderTable) -> Vec<(String, Vec<String>)> {
    table.iter().map(|(k, v)| (k.to_owned(), v.to_vec())).collect()
}

// --- model ---

#[test]
fn with_header_appends_under_folded_name_and_keeps_original() {
    let before = Response::json(serde_json::json!([])).with_header("Accept", "a");
    let after = before.clone().with_header("ACCEPT", "b");

    assert_eq!(before.folded_headers().get("accept").unwrap(), ["a"]);
    assert_eq!(after.folded_headers().get("accept").unwrap(), ["a", "b"]);
    assert_eq!(before.headers().len(), 1);
}

#[test]
fn header_names_fold_case_insensitively() {
    let r = Response::text("").with_header("X-Test", "a").with_header("x-test", "b");
    assert_eq!(r.folded_headers().get("x-test").unwrap(), ["a", "b"]);
    assert_eq!(r.folded_headers().get("X-TEST").unwrap(), ["a", "b"]);
}

#[test]
fn header_values_keep_insertion_order() {
    let r = Response::text("")
        .with_headers("X-Order", ["a", "b"])
        .with_headers("X-Order", ["c"]);
    assert_eq!(r.folded_headers().get("x-order").unwrap(), ["a", "b", "c"]);
}

#[test]
fn folding_twice_changes_nothing() {
    let r = Response::text("")
        .with_header("B", "1")
        .with_headers("a", ["2", "2"])
        .with_header("b", "3");
    let once = r.folded_headers();
    assert_eq!(ordered(&once), ordered(&once.fold()));
    assert_eq!(once.get("a").unwrap(), ["2", "2"]);
}

// --- adapter ---

#[test]
fn json_body_round_trips() {
    let rec = Recording::of(Response::json(serde_json::json!({ "foo": "bar" })));

    let decoded: serde_json::Value = serde_json::from_slice(rec.body()).unwrap();
    assert_eq!(decoded, serde_json::json!({ "foo": "bar" }));
    assert_eq!(rec.header_values("content-type"), ["application/json; charset=utf-8"]);
}

#[test]
fn json_body_accepts_any_serialize_type() {
    #[derive(Serialize)]
    struct User {
        id: u64,
        tags: Vec<&'static str>,
        manager: Option<Box<User>>,
    }

    let user = User {
        id: 1,
        tags: vec!["admin"],
        manager: Some(Box::new(User { id: 2, tags: vec![], manager: None })),
    };
    let rec = Recording::of(Response::json(user));
    let decoded: serde_json::Value = serde_json::from_slice(rec.body()).unwrap();
    assert_eq!(decoded["manager"]["id"], 2);
    assert_eq!(decoded["tags"][0], "admin");
}

#[test]
fn text_body_defaults() {
    let rec = Recording::of(Response::text("Hello, World!"));

    assert_eq!(rec.0[0], Write::Status(200));
    assert_eq!(rec.header_values("content-type"), ["text/plain; charset=utf-8"]);
    assert_eq!(rec.body(), &Bytes::from_static(b"Hello, World!"));
}

#[test]
fn explicit_content_type_wins() {
    let rec = Recording::of(
        Response::json(serde_json::json!({})).with_header("Content-Type", "text/csv"),
    );
    assert_eq!(rec.header_values("content-type"), ["text/csv"]);
}

#[test]
fn status_written_once_and_first() {
    let rec = Recording::of(
        Response::text("x").with_status(Status::NotFound.code()).with_header("X-A", "1"),
    );

    let statuses: Vec<_> = rec.0.iter().filter(|w| matches!(w, Write::Status(_))).collect();
    assert_eq!(statuses, [&Write::Status(404)]);
    assert_eq!(rec.0[0], Write::Status(404));
    assert!(matches!(rec.0.last(), Some(Write::Body(_))));
}

#[test]
fn unknown_status_is_passed_through() {
    let rec = Recording::of(Response::text("").with_status(1234));
    assert_eq!(rec.0[0], Write::Status(1234));
}

#[test]
fn duplicate_values_are_written_twice() {
    let rec = Recording::of(Response::text("").with_header("Vary", "origin").with_header("vary", "origin"));
    assert_eq!(rec.header_values("vary"), ["origin", "origin"]);
}

#[test]
fn unserializable_body_is_a_serialization_error() {
    let mut body = std::collections::HashMap::new();
    body.insert(vec![1u8], 1);

    let mut rec = Recording::default();
    let err = render(Response::json(body), &mut rec).unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
    assert!(rec.0.is_empty());
}
