//! In-memory heap page over a raw page buffer.

use crate::page::{PageError, PageResult};
use crate::schema::DescriptorRef;
use crate::tuple::{Tuple, TupleResult};
use std::fmt;
use std::ops::Range;
use strata_common::types::{PageId, RecordId, SlotId};

/// One heap page, held as the raw page buffer plus decoded geometry.
///
/// The buffer is kept byte-for-byte as read, so `decode` followed by
/// [`encode`](HeapPage::encode) reproduces the input exactly, including
/// the bytes of free slots and the trailing padding.
///
/// Slots are read lazily: [`tuple`](HeapPage::tuple) and
/// [`tuples`](HeapPage::tuples) decode straight out of the buffer, and
/// [`put_tuple`](HeapPage::put_tuple) encodes straight into it.
#[derive(Clone, PartialEq, Eq)]
pub struct HeapPage {
    id: PageId,
    descriptor: DescriptorRef,
    data: Vec<u8>,
    tuple_bytes: usize,
    slot_capacity: usize,
    header_bytes: usize,
}

impl HeapPage {
    /// Returns how many tuples of `tuple_bytes` fit in a page of
    /// `page_size` bytes, counting the one header bit each slot costs.
    #[inline]
    #[must_use]
    pub const fn capacity_for(page_size: usize, tuple_bytes: usize) -> usize {
        (page_size * 8) / (tuple_bytes * 8 + 1)
    }

    /// Returns the size of the occupancy bitmap for a page of
    /// `slot_capacity` slots.
    #[inline]
    #[must_use]
    pub const fn header_bytes_for(slot_capacity: usize) -> usize {
        slot_capacity.div_ceil(8)
    }

    /// Creates an empty page: all slots free, buffer zeroed.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::TupleTooLarge`] if not even one tuple of
    /// this descriptor fits in `page_size` bytes.
    pub fn empty(id: PageId, descriptor: DescriptorRef, page_size: usize) -> PageResult<Self> {
        let (tuple_bytes, slot_capacity) = Self::geometry(&descriptor, page_size)?;
        Ok(Self {
            id,
            descriptor,
            data: vec![0; page_size],
            tuple_bytes,
            slot_capacity,
            header_bytes: Self::header_bytes_for(slot_capacity),
        })
    }

    /// Decodes a page from its on-disk image.
    ///
    /// The whole page is validated up front: the buffer must be exactly
    /// `page_size` bytes, padding bits past the slot capacity must be
    /// clear, and every occupied slot must hold a well-formed tuple.
    /// After that, slot reads cannot fail.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::BufferSize`] for a wrong-sized buffer,
    /// [`PageError::TupleTooLarge`] if the descriptor does not fit the
    /// page size, and [`PageError::CorruptHeader`] or
    /// [`PageError::CorruptSlot`] for validation failures.
    pub fn decode(
        id: PageId,
        descriptor: DescriptorRef,
        page_size: usize,
        bytes: Vec<u8>,
    ) -> PageResult<Self> {
        if bytes.len() != page_size {
            return Err(PageError::BufferSize {
                expected: page_size,
                actual: bytes.len(),
            });
        }
        let (tuple_bytes, slot_capacity) = Self::geometry(&descriptor, page_size)?;
        let page = Self {
            id,
            descriptor,
            data: bytes,
            tuple_bytes,
            slot_capacity,
            header_bytes: Self::header_bytes_for(slot_capacity),
        };

        for bit in page.slot_capacity..page.header_bytes * 8 {
            if page.header_bit(bit) {
                return Err(PageError::corrupt_header(
                    id,
                    format!("padding bit {bit} is set past slot capacity {slot_capacity}"),
                ));
            }
        }
        for index in 0..page.slot_capacity {
            if page.header_bit(index) {
                page.decode_slot(index).map_err(|source| PageError::CorruptSlot {
                    page_id: id,
                    slot: SlotId::new(index as u16),
                    source,
                })?;
            }
        }
        Ok(page)
    }

    /// Returns the on-disk image of this page.
    #[inline]
    #[must_use]
    pub fn encode(&self) -> &[u8] {
        &self.data
    }

    /// Returns this page's ID.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> PageId {
        self.id
    }

    /// Returns the descriptor all tuples on this page share.
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &DescriptorRef {
        &self.descriptor
    }

    /// Returns the page size in bytes.
    #[inline]
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of slots on this page.
    #[inline]
    #[must_use]
    pub const fn slot_capacity(&self) -> usize {
        self.slot_capacity
    }

    /// Returns the size of the occupancy bitmap in bytes.
    #[inline]
    #[must_use]
    pub const fn header_bytes(&self) -> usize {
        self.header_bytes
    }

    /// Returns whether `slot` holds a tuple.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::SlotOutOfRange`] if `slot` is past the
    /// page's capacity.
    pub fn is_slot_used(&self, slot: SlotId) -> PageResult<bool> {
        self.check_slot(slot)?;
        Ok(self.header_bit(slot.index()))
    }

    /// Returns the tuple in `slot`, or `None` if the slot is free.
    ///
    /// The returned tuple carries a record ID naming this page and slot.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::SlotOutOfRange`] if `slot` is past the
    /// page's capacity, or [`PageError::CorruptSlot`] if the slot bytes
    /// do not decode (cannot happen for a page built through `decode`
    /// or mutated through `put_tuple`, both of which validate).
    pub fn tuple(&self, slot: SlotId) -> PageResult<Option<Tuple>> {
        self.check_slot(slot)?;
        if !self.header_bit(slot.index()) {
            return Ok(None);
        }
        self.decode_slot(slot.index())
            .map(Some)
            .map_err(|source| PageError::CorruptSlot {
                page_id: self.id,
                slot,
                source,
            })
    }

    /// Returns an iterator over the occupied slots in slot order.
    ///
    /// Tuples are decoded on demand from the page buffer.
    pub fn tuples(&self) -> impl Iterator<Item = Tuple> + '_ {
        (0..self.slot_capacity).filter_map(move |index| {
            if self.header_bit(index) {
                self.decode_slot(index).ok()
            } else {
                None
            }
        })
    }

    /// Stores `tuple` in `slot`, overwriting whatever was there, and
    /// marks the slot occupied.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::SlotOutOfRange`] if `slot` is past the
    /// page's capacity, or [`PageError::DescriptorMismatch`] if the
    /// tuple's field types differ from the page's.
    pub fn put_tuple(&mut self, slot: SlotId, tuple: &Tuple) -> PageResult<()> {
        self.check_slot(slot)?;
        if **tuple.descriptor() != *self.descriptor {
            return Err(PageError::DescriptorMismatch { page_id: self.id });
        }
        let range = self.slot_range(slot.index());
        tuple.encode_into(&mut self.data[range]);
        self.set_header_bit(slot.index(), true);
        Ok(())
    }

    /// Marks `slot` free. The slot bytes are left in place; only the
    /// header bit changes.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::SlotOutOfRange`] if `slot` is past the
    /// page's capacity.
    pub fn clear_slot(&mut self, slot: SlotId) -> PageResult<()> {
        self.check_slot(slot)?;
        self.set_header_bit(slot.index(), false);
        Ok(())
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub fn used_slot_count(&self) -> usize {
        self.data[..self.header_bytes]
            .iter()
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    /// Returns the number of free slots.
    #[must_use]
    pub fn free_slot_count(&self) -> usize {
        self.slot_capacity - self.used_slot_count()
    }

    // -------------------------------------------------------------------------
    // Private helpers
    // -------------------------------------------------------------------------

    fn geometry(descriptor: &DescriptorRef, page_size: usize) -> PageResult<(usize, usize)> {
        let tuple_bytes = descriptor.byte_size();
        let slot_capacity = Self::capacity_for(page_size, tuple_bytes);
        if slot_capacity == 0 {
            return Err(PageError::TupleTooLarge {
                tuple_bytes,
                page_size,
            });
        }
        debug_assert!(slot_capacity <= usize::from(u16::MAX));
        Ok((tuple_bytes, slot_capacity))
    }

    fn check_slot(&self, slot: SlotId) -> PageResult<()> {
        if slot.index() >= self.slot_capacity {
            return Err(PageError::SlotOutOfRange {
                page_id: self.id,
                slot,
                capacity: self.slot_capacity,
            });
        }
        Ok(())
    }

    fn header_bit(&self, index: usize) -> bool {
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    fn set_header_bit(&mut self, index: usize, used: bool) {
        let mask = 1u8 << (index % 8);
        if used {
            self.data[index / 8] |= mask;
        } else {
            self.data[index / 8] &= !mask;
        }
    }

    fn slot_range(&self, index: usize) -> Range<usize> {
        let start = self.header_bytes + index * self.tuple_bytes;
        start..start + self.tuple_bytes
    }

    fn decode_slot(&self, index: usize) -> TupleResult<Tuple> {
        let range = self.slot_range(index);
        let mut tuple = Tuple::decode(DescriptorRef::clone(&self.descriptor), &self.data[range])?;
        tuple.set_record_id(Some(RecordId::new(self.id, SlotId::new(index as u16))));
        Ok(tuple)
    }
}

impl fmt::Debug for HeapPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapPage")
            .field("id", &self.id)
            .field("page_size", &self.data.len())
            .field("slot_capacity", &self.slot_capacity)
            .field("used_slots", &self.used_slot_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDef, FieldType, TupleDescriptor};
    use crate::tuple::FieldValue;
    use std::sync::Arc;
    use strata_common::types::TableId;

    const PAGE_SIZE: usize = 4096;

    fn int_descriptor() -> DescriptorRef {
        Arc::new(TupleDescriptor::from_types(&[FieldType::Int]).unwrap())
    }

    fn person_descriptor() -> DescriptorRef {
        Arc::new(
            TupleDescriptor::new(vec![
                FieldDef::named(FieldType::Int, "id"),
                FieldDef::named(FieldType::Text, "name"),
            ])
            .unwrap(),
        )
    }

    fn page_id(number: u32) -> PageId {
        PageId::new(TableId::new(7), number)
    }

    fn int_tuple(descriptor: &DescriptorRef, value: i32) -> Tuple {
        Tuple::new(Arc::clone(descriptor), vec![FieldValue::int(value)]).unwrap()
    }

    #[test]
    fn test_capacity_arithmetic() {
        // 4-byte tuples: 32768 bits / 33 bits per slot.
        assert_eq!(HeapPage::capacity_for(4096, 4), 992);
        assert_eq!(HeapPage::header_bytes_for(992), 124);

        // 136-byte tuples (INT + TEXT).
        assert_eq!(HeapPage::capacity_for(4096, 136), 30);
        assert_eq!(HeapPage::header_bytes_for(30), 4);

        // 132-byte tuples fill the page exactly: 31 * 132 + 4 = 4096.
        assert_eq!(HeapPage::capacity_for(4096, 132), 31);
        assert_eq!(HeapPage::header_bytes_for(31), 4);
    }

    #[test]
    fn test_empty_page_geometry() {
        let page = HeapPage::empty(page_id(0), int_descriptor(), PAGE_SIZE).unwrap();
        assert_eq!(page.slot_capacity(), 992);
        assert_eq!(page.header_bytes(), 124);
        assert_eq!(page.page_size(), PAGE_SIZE);
        assert_eq!(page.used_slot_count(), 0);
        assert_eq!(page.free_slot_count(), 992);
        assert!(page.encode().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_tuple_too_large() {
        // 32 text fields encode to 4224 bytes, more than a whole page.
        let wide = Arc::new(TupleDescriptor::from_types(&[FieldType::Text; 32]).unwrap());
        let err = HeapPage::empty(page_id(0), wide, PAGE_SIZE).unwrap_err();
        assert!(matches!(err, PageError::TupleTooLarge { .. }));

        // 31 text fields (4092 bytes) still fit exactly one slot.
        let tight = Arc::new(TupleDescriptor::from_types(&[FieldType::Text; 31]).unwrap());
        let page = HeapPage::empty(page_id(0), tight, PAGE_SIZE).unwrap();
        assert_eq!(page.slot_capacity(), 1);
    }

    #[test]
    fn test_put_and_get_tuple() {
        let descriptor = int_descriptor();
        let mut page = HeapPage::empty(page_id(3), Arc::clone(&descriptor), PAGE_SIZE).unwrap();

        let slot = SlotId::new(5);
        assert!(!page.is_slot_used(slot).unwrap());
        assert!(page.tuple(slot).unwrap().is_none());

        page.put_tuple(slot, &int_tuple(&descriptor, 42)).unwrap();
        assert!(page.is_slot_used(slot).unwrap());
        assert_eq!(page.used_slot_count(), 1);

        let stored = page.tuple(slot).unwrap().unwrap();
        assert_eq!(stored.value(0).unwrap(), &FieldValue::int(42));
        assert_eq!(
            stored.record_id(),
            Some(RecordId::new(page_id(3), slot))
        );
    }

    #[test]
    fn test_put_tuple_rejects_wrong_descriptor() {
        let mut page = HeapPage::empty(page_id(0), int_descriptor(), PAGE_SIZE).unwrap();
        let other = person_descriptor();
        let tuple = Tuple::new(
            Arc::clone(&other),
            vec![FieldValue::int(1), FieldValue::text("ada")],
        )
        .unwrap();

        let err = page.put_tuple(SlotId::new(0), &tuple).unwrap_err();
        assert!(matches!(err, PageError::DescriptorMismatch { .. }));
    }

    #[test]
    fn test_slot_out_of_range() {
        let mut page = HeapPage::empty(page_id(0), int_descriptor(), PAGE_SIZE).unwrap();
        let past_end = SlotId::new(992);

        assert!(matches!(
            page.is_slot_used(past_end).unwrap_err(),
            PageError::SlotOutOfRange { capacity: 992, .. }
        ));
        assert!(matches!(
            page.clear_slot(past_end).unwrap_err(),
            PageError::SlotOutOfRange { .. }
        ));
    }

    #[test]
    fn test_clear_slot_keeps_bytes() {
        let descriptor = int_descriptor();
        let mut page = HeapPage::empty(page_id(0), Arc::clone(&descriptor), PAGE_SIZE).unwrap();
        let slot = SlotId::new(0);

        page.put_tuple(slot, &int_tuple(&descriptor, 7)).unwrap();
        let with_tuple = page.encode().to_vec();

        page.clear_slot(slot).unwrap();
        assert!(page.tuple(slot).unwrap().is_none());
        assert_eq!(page.used_slot_count(), 0);

        // Only the header bit changed; the slot region still holds the
        // old bytes.
        let cleared = page.encode();
        assert_eq!(&cleared[page.header_bytes()..], &with_tuple[page.header_bytes()..]);
        assert_ne!(&cleared[..page.header_bytes()], &with_tuple[..page.header_bytes()]);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let descriptor = int_descriptor();
        let mut page = HeapPage::empty(page_id(9), Arc::clone(&descriptor), PAGE_SIZE).unwrap();
        for index in [0usize, 1, 7, 8, 500, 991] {
            page.put_tuple(SlotId::new(index as u16), &int_tuple(&descriptor, index as i32))
                .unwrap();
        }

        let bytes = page.encode().to_vec();
        let decoded =
            HeapPage::decode(page_id(9), Arc::clone(&descriptor), PAGE_SIZE, bytes.clone())
                .unwrap();

        assert_eq!(decoded, page);
        assert_eq!(decoded.encode(), &bytes[..]);
        assert_eq!(decoded.used_slot_count(), 6);
    }

    #[test]
    fn test_decode_rejects_wrong_size() {
        let err = HeapPage::decode(page_id(0), int_descriptor(), PAGE_SIZE, vec![0; 100])
            .unwrap_err();
        assert!(matches!(
            err,
            PageError::BufferSize {
                expected: 4096,
                actual: 100
            }
        ));

        let err = HeapPage::decode(page_id(0), int_descriptor(), PAGE_SIZE, vec![0; 8192])
            .unwrap_err();
        assert!(matches!(err, PageError::BufferSize { .. }));
    }

    #[test]
    fn test_decode_rejects_padding_bits() {
        // Capacity 992 fills the 124-byte header exactly, so use the
        // INT + TEXT layout: 30 slots leave 2 padding bits in byte 3.
        let descriptor = person_descriptor();
        let mut bytes = vec![0u8; PAGE_SIZE];
        bytes[3] = 0b0100_0000; // bit 30, one past the last slot

        let err = HeapPage::decode(page_id(0), descriptor, PAGE_SIZE, bytes).unwrap_err();
        assert!(matches!(err, PageError::CorruptHeader { .. }));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_decode_validates_occupied_slots() {
        let descriptor = person_descriptor();
        let mut page = HeapPage::empty(page_id(0), Arc::clone(&descriptor), PAGE_SIZE).unwrap();
        let tuple = Tuple::new(
            Arc::clone(&descriptor),
            vec![FieldValue::int(1), FieldValue::text("ada")],
        )
        .unwrap();
        page.put_tuple(SlotId::new(0), &tuple).unwrap();

        // Stamp an impossible text length into the occupied slot.
        let mut bytes = page.encode().to_vec();
        let text_offset = page.header_bytes() + 4;
        bytes[text_offset..text_offset + 4].copy_from_slice(&999u32.to_le_bytes());

        let err = HeapPage::decode(page_id(0), descriptor, PAGE_SIZE, bytes).unwrap_err();
        assert!(matches!(
            err,
            PageError::CorruptSlot { slot, .. } if slot == SlotId::new(0)
        ));
    }

    #[test]
    fn test_decode_ignores_free_slot_garbage() {
        // Free slots may hold arbitrary bytes (e.g. cleared tuples);
        // only occupied slots are validated.
        let descriptor = person_descriptor();
        let mut bytes = vec![0u8; PAGE_SIZE];
        for byte in bytes.iter_mut().skip(4) {
            *byte = 0xff;
        }

        let page = HeapPage::decode(page_id(0), descriptor, PAGE_SIZE, bytes).unwrap();
        assert_eq!(page.used_slot_count(), 0);
        assert_eq!(page.tuples().count(), 0);
    }

    #[test]
    fn test_tuples_iterates_in_slot_order() {
        let descriptor = int_descriptor();
        let mut page = HeapPage::empty(page_id(2), Arc::clone(&descriptor), PAGE_SIZE).unwrap();
        for index in [900u16, 3, 77, 12] {
            page.put_tuple(SlotId::new(index), &int_tuple(&descriptor, i32::from(index)))
                .unwrap();
        }

        let values: Vec<i32> = page
            .tuples()
            .map(|t| match t.value(0).unwrap() {
                FieldValue::Int(v) => *v,
                FieldValue::Text(_) => unreachable!(),
            })
            .collect();
        assert_eq!(values, vec![3, 12, 77, 900]);

        let slots: Vec<u16> = page
            .tuples()
            .map(|t| t.record_id().unwrap().slot().as_u16())
            .collect();
        assert_eq!(slots, vec![3, 12, 77, 900]);
    }

    #[test]
    fn test_full_page() {
        let descriptor = int_descriptor();
        let mut page = HeapPage::empty(page_id(0), Arc::clone(&descriptor), PAGE_SIZE).unwrap();
        for index in 0..page.slot_capacity() {
            page.put_tuple(SlotId::new(index as u16), &int_tuple(&descriptor, index as i32))
                .unwrap();
        }

        assert_eq!(page.used_slot_count(), 992);
        assert_eq!(page.free_slot_count(), 0);
        assert_eq!(page.tuples().count(), 992);

        // Header is all ones, with no stray padding bits to reject.
        let decoded = HeapPage::decode(
            page_id(0),
            descriptor,
            PAGE_SIZE,
            page.encode().to_vec(),
        )
        .unwrap();
        assert_eq!(decoded.used_slot_count(), 992);
    }
}
