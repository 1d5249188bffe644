//! Integration tests using realistic API documents
//!
//! Tests the full flow: HTTP GET → token scan → typed row collections + metadata

use chrono::{DateTime, FixedOffset, TimeZone};
use eve_rowset::destination::{Destination, Registry, Schema, Tag};
use eve_rowset::record::{AttrError, Attributes, FromAttributes};
use eve_rowset::{decode, default_timezone, Client, ClientConfig, Decoder, Error};
use pretty_assertions::assert_eq;
use std::sync::LazyLock;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Destination Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct CallGroup {
    id: i32,
    name: String,
    description: String,
}

impl FromAttributes for CallGroup {
    fn from_attributes(attrs: &Attributes) -> Result<Self, AttrError> {
        Ok(Self {
            id: attrs.required("groupID")?,
            name: attrs.string("name"),
            description: attrs.string("description"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Call {
    access_mask: u64,
    kind: String,
    name: String,
    group_id: i32,
}

impl FromAttributes for Call {
    fn from_attributes(attrs: &Attributes) -> Result<Self, AttrError> {
        Ok(Self {
            access_mask: attrs.required("accessMask")?,
            kind: attrs.string("type"),
            name: attrs.string("name"),
            group_id: attrs.parse("groupID")?,
        })
    }
}

#[derive(Debug, Default)]
struct CallList {
    call_groups: Vec<CallGroup>,
    calls: Vec<Box<Call>>,
    fetched_by: String,
}

impl Destination for CallList {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<CallList>> = LazyLock::new(|| {
            Schema::<CallList>::builder()
                .rows("call_groups", "callGroups", |d| &mut d.call_groups)
                .rows("calls", Tag::Untagged, |d| &mut d.calls)
                .hidden("fetched_by")
                .build()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Skill {
    type_id: i64,
    level: u8,
    published: bool,
}

impl FromAttributes for Skill {
    fn from_attributes(attrs: &Attributes) -> Result<Self, AttrError> {
        Ok(Self {
            type_id: attrs.required("typeID")?,
            level: attrs.parse("level")?,
            published: attrs.flag("published")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct QueueEntry {
    type_id: i64,
    level: u8,
    end_time: Option<DateTime<FixedOffset>>,
}

impl FromAttributes for QueueEntry {
    fn from_attributes(attrs: &Attributes) -> Result<Self, AttrError> {
        Ok(Self {
            type_id: attrs.required("typeID")?,
            level: attrs.parse("level")?,
            end_time: attrs.timestamp("endTime", default_timezone())?,
        })
    }
}

#[derive(Debug, Default)]
struct CharacterSheet {
    skills: Vec<Skill>,
    queue: Vec<QueueEntry>,
    balance: f64,
}

impl Destination for CharacterSheet {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<CharacterSheet>> = LazyLock::new(|| {
            Schema::<CharacterSheet>::builder()
                .rows("skills", "skills", |d| &mut d.skills)
                .rows("queue", "skillqueue", |d| &mut d.queue)
                .value("balance", Tag::Untagged)
                .build()
        });
        &SCHEMA
    }
}

// ============================================================================
// Documents
// ============================================================================

const CALL_LIST: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<eveapi version="2">
  <currentTime>2014-10-18 10:11:43</currentTime>
  <result>
    <rowset name="callGroups" key="groupID" columns="groupID,name,description">
      <row groupID="1" name="Account and Market" description="Market Orders, account balance and journal history." />
      <row groupID="2" name="Science and Industry" description="Datacore production and job listing." />
      <row groupID="7" name="Communications" description="Private communications such as contact lists, Eve Mail and Notifications." />
    </rowset>
    <rowset name="calls" key="accessMask,type" columns="accessMask,type,name,groupID,description">
      <row accessMask="134217728" type="Character" name="Locations" groupID="7" description="Allows the fetching of coordinate and name data for items owned by the character." />
      <row accessMask="67108864" type="Character" name="Contracts" groupID="2" description="List of all Contracts the character is involved in." />
    </rowset>
  </result>
  <cachedUntil>2014-10-18 11:08:43</cachedUntil>
</eveapi>"#;

const CHARACTER_SHEET: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<eveapi version="2">
  <currentTime>2014-10-18 10:11:43</currentTime>
  <result>
    <characterID>90000001</characterID>
    <balance>190210393.87</balance>
    <rowset name="implants" key="typeID" columns="typeID,typeName">
      <row typeID="9899" typeName="Ocular Filter - Basic" />
    </rowset>
    <rowset name="skills" key="typeID" columns="typeID,skillpoints,level,published">
      <row typeID="3431" skillpoints="8000" level="3" published="1" />
      <row typeID="3413" skillpoints="256000" level="5" published="1" />
      <row typeID="21059" skillpoints="500" level="1" published="0" />
    </rowset>
    <rowset name="skillqueue" key="queuePosition" columns="queuePosition,typeID,level,startTime,endTime">
      <row queuePosition="0" typeID="11441" level="3" startTime="2014-10-17 23:00:00" endTime="2014-10-19 01:02:03" />
      <row queuePosition="1" typeID="20533" level="4" startTime="" endTime="" />
    </rowset>
  </result>
  <cachedUntil>2014-10-18 11:11:43</cachedUntil>
</eveapi>"#;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
    default_timezone()
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .unwrap()
}

// ============================================================================
// Decode Tests
// ============================================================================

#[test]
fn test_decode_call_list() {
    let mut out = CallList::default();
    let meta = decode(CALL_LIST.as_bytes(), &mut out).unwrap();

    assert_eq!(meta.expires, utc(2014, 10, 18, 11, 8, 43));
    assert_eq!(meta.row_sets.len(), 2);
    assert_eq!(meta.row_sets[1].keys, vec!["accessMask", "type"]);

    let ids: Vec<i32> = out.call_groups.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2, 7]);
    assert_eq!(out.call_groups[1].name, "Science and Industry");

    assert_eq!(out.calls.len(), 2);
    assert_eq!(out.calls[0].access_mask, 134_217_728);
    assert_eq!(out.calls[0].kind, "Character");
    assert_eq!(out.calls[1].name, "Contracts");
    assert_eq!(out.calls[1].group_id, 2);

    assert!(out.fetched_by.is_empty());
}

#[test]
fn test_decode_character_sheet() {
    let mut out = CharacterSheet::default();
    let meta = decode(CHARACTER_SHEET.as_bytes(), &mut out).unwrap();

    let names: Vec<&str> = meta.row_sets.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["implants", "skills", "skillqueue"]);
    assert_eq!(
        meta.row_set("implants").unwrap().columns,
        vec!["typeID", "typeName"]
    );

    assert_eq!(
        out.skills,
        vec![
            Skill {
                type_id: 3431,
                level: 3,
                published: true
            },
            Skill {
                type_id: 3413,
                level: 5,
                published: true
            },
            Skill {
                type_id: 21059,
                level: 1,
                published: false
            },
        ]
    );

    assert_eq!(out.queue.len(), 2);
    assert_eq!(out.queue[0].end_time, Some(utc(2014, 10, 19, 1, 2, 3)));
    assert_eq!(out.queue[1].end_time, None);
    assert_eq!(out.queue[1].type_id, 20533);

    // Untagged value fields are left alone.
    assert!(out.balance.abs() < f64::EPSILON);
}

#[test]
fn test_decode_through_registry() {
    let registry = Registry::new().with::<CallList>().with::<CharacterSheet>();

    let mut calls = CallList::default();
    let mut sheet = CharacterSheet::default();

    Decoder::from_buf_reader(CALL_LIST.as_bytes())
        .decode_dyn(&registry, &mut calls)
        .unwrap();
    Decoder::from_buf_reader(CHARACTER_SHEET.as_bytes())
        .decode_dyn(&registry, &mut sheet)
        .unwrap();

    assert_eq!(calls.call_groups.len(), 3);
    assert_eq!(sheet.skills.len(), 3);

    let mut unknown = String::new();
    let err = Decoder::from_buf_reader(CALL_LIST.as_bytes())
        .decode_dyn(&registry, &mut unknown)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidTarget { .. }));
}

#[test]
fn test_decode_into_record_without_bindings() {
    #[derive(Debug, Default)]
    struct Nothing;

    impl Destination for Nothing {
        fn schema() -> &'static Schema<Self> {
            static SCHEMA: LazyLock<Schema<Nothing>> =
                LazyLock::new(|| Schema::<Nothing>::builder().build());
            &SCHEMA
        }
    }

    let meta = decode(CALL_LIST.as_bytes(), &mut Nothing).unwrap();
    assert_eq!(meta.row_sets.len(), 2);
    assert_eq!(meta.expires, utc(2014, 10, 18, 11, 8, 43));
}

// ============================================================================
// HTTP Integration Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_and_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/CallList.xml.aspx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CALL_LIST))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(format!("{}/", server.uri()))
        .build();
    let client = Client::with_config(config).unwrap();

    let mut out = CallList::default();
    let meta = client.call("/api/CallList.xml.aspx", &mut out).await.unwrap();

    assert_eq!(out.call_groups.len(), 3);
    assert_eq!(out.calls.len(), 2);
    assert_eq!(meta.row_set("calls").unwrap().keys, vec!["accessMask", "type"]);
}

#[tokio::test]
async fn test_fetch_absolute_endpoint_overrides_base() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/char/CharacterSheet.xml.aspx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHARACTER_SHEET))
        .expect(1)
        .mount(&server)
        .await;

    // Base points nowhere useful; the absolute endpoint wins.
    let client = Client::default();
    let mut out = CharacterSheet::default();
    client
        .call(
            &format!("{}/char/CharacterSheet.xml.aspx", server.uri()),
            &mut out,
        )
        .await
        .unwrap();

    assert_eq!(out.skills.len(), 3);
}

#[tokio::test]
async fn test_fetch_truncated_body() {
    let server = MockServer::start().await;
    let truncated = &CALL_LIST[..CALL_LIST.find("</rowset>").unwrap()];

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(truncated))
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(format!("{}/", server.uri()))
        .build();
    let client = Client::with_config(config).unwrap();

    let mut out = CallList::default();
    let err = client
        .call("api/CallList.xml.aspx", &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnexpectedEof { ref rowset } if rowset == "callGroups"));
    assert_eq!(out.call_groups.len(), 3);
}
