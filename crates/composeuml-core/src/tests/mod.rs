mod facts;
mod routing;

use crate::*;

pub(crate) fn doc(text: &str) -> ComposeDocument {
    parse_document(text, &SchemaPolicy::default()).unwrap()
}
