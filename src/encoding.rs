//! DER building blocks shared by the container, signer and attribute codecs.
//!
//! Decoding works on [`SliceReader`]s: a constructed TLV is consumed from the
//! outer reader and its contents are handed back as a reader of their own.
//! Encoding builds values bottom-up into byte vectors.

use der::{Decode, Encode, Header, Length, Reader, SliceReader, Tag, TagNumber};

use crate::Result;

/// Constructed context-specific tag `[number]`.
pub(crate) const fn context_tag(number: TagNumber) -> Tag {
    Tag::ContextSpecific {
        constructed: true,
        number,
    }
}

/// Reads the next TLV, checks its tag and returns its contents.
pub(crate) fn value_of<'a>(reader: &mut SliceReader<'a>, tag: Tag) -> Result<&'a [u8]> {
    let header = Header::decode(reader)?;
    header.tag.assert_eq(tag)?;
    Ok(reader.read_slice(header.length)?)
}

/// Reads the next TLV, checks its tag and returns a reader over its contents.
pub(crate) fn constructed<'a>(reader: &mut SliceReader<'a>, tag: Tag) -> Result<SliceReader<'a>> {
    Ok(SliceReader::new(value_of(reader, tag)?)?)
}

/// Reads a SET OF / SEQUENCE OF with the given outer tag, decoding each
/// element with `element`.
pub(crate) fn collection_of<'a, T>(
    reader: &mut SliceReader<'a>,
    tag: Tag,
    mut element: impl FnMut(&mut SliceReader<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    let mut contents = constructed(reader, tag)?;
    let mut elements = Vec::new();
    while !contents.is_finished() {
        elements.push(element(&mut contents)?);
    }
    Ok(elements)
}

/// Returns `true` when the next TLV carries `tag`.
pub(crate) fn next_is(reader: &SliceReader<'_>, tag: Tag) -> bool {
    !reader.is_finished() && matches!(reader.peek_tag(), Ok(next) if next == tag)
}

/// Decodes a complete DER value from `bytes`.
pub(crate) fn decode_all<T>(bytes: &[u8]) -> Result<T>
where
    T: for<'a> Decode<'a>,
{
    Ok(T::from_der(bytes)?)
}

/// Encodes `contents` under `tag`.
pub(crate) fn tlv(tag: Tag, contents: &[u8]) -> Result<Vec<u8>> {
    let mut out = Header::new(tag, Length::try_from(contents.len())?)?.to_der()?;
    out.extend_from_slice(contents);
    Ok(out)
}

/// Encodes a SET OF from already-encoded elements in DER order.
///
/// Duplicates are kept: callers hand in lists, not sets.
pub(crate) fn ordered_set_of(tag: Tag, mut elements: Vec<Vec<u8>>) -> Result<Vec<u8>> {
    elements.sort();
    tlv(tag, &elements.concat())
}

/// Encodes every item and collects the encodings.
pub(crate) fn encode_each<'a, T>(items: impl IntoIterator<Item = &'a T>) -> Result<Vec<Vec<u8>>>
where
    T: Encode + 'a,
{
    items
        .into_iter()
        .map(|item| Ok(item.to_der()?))
        .collect()
}
