use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Error as _},
    ser::SerializeStruct,
};

use crate::BoundedStack;

impl<T> Serialize for BoundedStack<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BoundedStack", 2)?;
        state.serialize_field("capacity", &self.capacity())?;
        state.serialize_field("items", self.as_slice())?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename = "BoundedStack", deny_unknown_fields)]
struct Repr<T> {
    capacity: usize,
    items: Vec<T>,
}

impl<'de, T> Deserialize<'de> for BoundedStack<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Repr { capacity, items } = Repr::deserialize(deserializer)?;

        if items.len() > capacity {
            return Err(de::Error::invalid_length(
                items.len(),
                &format!("at most {capacity} items").as_str(),
            ));
        }

        let mut stack = BoundedStack::try_with_capacity(capacity).map_err(D::Error::custom)?;

        for item in items {
            stack.push(item).map_err(D::Error::custom)?;
        }

        Ok(stack)
    }
}
