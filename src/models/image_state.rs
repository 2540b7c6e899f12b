use serde::de::{self, Error as _, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const GRID_UPDATE_MESSAGE: &str = "Grid update received";

/// Placement of a single image on the editor grid.
///
/// Decoding is lenient the way browser clients expect: keys match without
/// regard to ASCII case, `null` leaves a field (or a whole record) at its
/// zero value, and a repeated key overwrites the earlier one.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageState {
  pub name: String,
  pub grid_x: i64,
  pub grid_y: i64,
  pub angle: i64,
}

impl<'de> Deserialize<'de> for ImageState {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_option(ImageStateVisitor)
  }
}

struct ImageStateVisitor;

impl<'de> Visitor<'de> for ImageStateVisitor {
  type Value = ImageState;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("an image state object")
  }

  fn visit_none<E: de::Error>(self) -> Result<ImageState, E> {
    Ok(ImageState::default())
  }

  fn visit_unit<E: de::Error>(self) -> Result<ImageState, E> {
    Ok(ImageState::default())
  }

  fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ImageState, D::Error> {
    deserializer.deserialize_map(self)
  }

  fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ImageState, A::Error> {
    let mut state = ImageState::default();
    while let Some(key) = map.next_key::<String>()? {
      if key.eq_ignore_ascii_case("name") {
        if let Some(name) = map.next_value::<Option<String>>()? {
          state.name = name;
        }
      } else if key.eq_ignore_ascii_case("gridX") {
        if let Some(x) = map.next_value::<Option<i64>>()? {
          state.grid_x = x;
        }
      } else if key.eq_ignore_ascii_case("gridY") {
        if let Some(y) = map.next_value::<Option<i64>>()? {
          state.grid_y = y;
        }
      } else if key.eq_ignore_ascii_case("angle") {
        if let Some(angle) = map.next_value::<Option<i64>>()? {
          state.angle = angle;
        }
      } else {
        map.next_value::<IgnoredAny>()?;
      }
    }
    Ok(state)
  }
}

impl fmt::Display for ImageState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Name: {}, GridX: {}, GridY: {}, Angle: {}",
      self.name, self.grid_x, self.grid_y, self.angle
    )
  }
}

#[derive(Debug, Serialize)]
pub struct GridUpdateResponse {
  pub message: &'static str,
  pub data: Option<Vec<ImageState>>,
}

impl GridUpdateResponse {
  pub fn new(data: Option<Vec<ImageState>>) -> Self {
    GridUpdateResponse {
      message: GRID_UPDATE_MESSAGE,
      data,
    }
  }
}

/// Decodes the first JSON value of a request body. Trailing content is left
/// unread; a literal `null` yields `None`.
pub fn decode_grid_update(body: &[u8]) -> Result<Option<Vec<ImageState>>, serde_json::Error> {
  let mut stream = serde_json::Deserializer::from_slice(body)
    .into_iter::<Option<Vec<ImageState>>>();
  match stream.next() {
    Some(result) => result,
    None => Err(serde_json::Error::custom("empty request body")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_camel_case_records() {
    let body = br#"[{"name":"curve","gridX":3,"gridY":-1,"angle":270}]"#;
    let states = decode_grid_update(body).unwrap().unwrap();
    assert_eq!(states, vec![ImageState {
      name: "curve".into(),
      grid_x: 3,
      grid_y: -1,
      angle: 270,
    }]);
  }

  #[test]
  fn missing_and_unknown_fields() {
    let body = br#"[{"gridY":2,"colour":"red"}]"#;
    let states = decode_grid_update(body).unwrap().unwrap();
    assert_eq!(states[0], ImageState { grid_y: 2, ..Default::default() });
  }

  #[test]
  fn keys_ignore_case() {
    let body = br#"[{"NAME":"junction","GridX":3,"gridy":4,"Angle":180}]"#;
    let states = decode_grid_update(body).unwrap().unwrap();
    assert_eq!(states[0], ImageState {
      name: "junction".into(),
      grid_x: 3,
      grid_y: 4,
      angle: 180,
    });
  }

  #[test]
  fn nulls_decode_to_zero_values() {
    let body = br#"[null, {"name":null,"gridX":null,"gridY":7}]"#;
    let states = decode_grid_update(body).unwrap().unwrap();
    assert_eq!(states, vec![
      ImageState::default(),
      ImageState { grid_y: 7, ..Default::default() },
    ]);
  }

  #[test]
  fn repeated_keys_last_wins() {
    let body = br#"[{"gridX":1,"GridX":2,"angle":90,"angle":null}]"#;
    let states = decode_grid_update(body).unwrap().unwrap();
    assert_eq!(states[0].grid_x, 2);
    assert_eq!(states[0].angle, 90);
  }

  #[test]
  fn null_body_is_none() {
    assert_eq!(decode_grid_update(b"null").unwrap(), None);
  }

  #[test]
  fn only_first_value_is_read() {
    let states = decode_grid_update(b"[] [{\"name\":1}]").unwrap().unwrap();
    assert!(states.is_empty());
  }

  #[test]
  fn rejects_bad_bodies() {
    assert!(decode_grid_update(b"").is_err());
    assert!(decode_grid_update(b"  \n").is_err());
    assert!(decode_grid_update(b"{\"name\":\"x\"}").is_err());
    assert!(decode_grid_update(b"[{\"angle\":90.5}]").is_err());
    assert!(decode_grid_update(b"[{\"gridX\":\"4\"}]").is_err());
    assert!(decode_grid_update(b"[{\"name\":\"x\"").is_err());
    assert!(decode_grid_update(b"[5]").is_err());
    assert!(decode_grid_update(b"[{\"name\":7}]").is_err());
  }

  #[test]
  fn display_matches_log_line() {
    let state = ImageState { name: "straight".into(), grid_x: 1, grid_y: 2, angle: -90 };
    assert_eq!(state.to_string(), "Name: straight, GridX: 1, GridY: 2, Angle: -90");
  }

  #[test]
  fn response_envelope_shape() {
    let body = serde_json::to_value(GridUpdateResponse::new(None)).unwrap();
    assert_eq!(body, serde_json::json!({"message": "Grid update received", "data": null}));
  }
}
