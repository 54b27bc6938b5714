//! Benchmark utilities and helpers.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use strata_storage::schema::{DescriptorRef, FieldDef, FieldType, TupleDescriptor};
use strata_storage::tuple::{FieldValue, Tuple};

/// Generates random string data for benchmarks.
pub fn random_string(rng: &mut StdRng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Descriptor with a single INT field, the narrowest tuple layout.
pub fn int_descriptor() -> DescriptorRef {
    Arc::new(TupleDescriptor::from_types(&[FieldType::Int]).unwrap())
}

/// Descriptor with an INT id and a TEXT name.
pub fn person_descriptor() -> DescriptorRef {
    Arc::new(
        TupleDescriptor::new(vec![
            FieldDef::named(FieldType::Int, "id"),
            FieldDef::named(FieldType::Text, "name"),
        ])
        .unwrap(),
    )
}

/// Generates `count` single-INT tuples from a fixed seed.
pub fn generate_int_tuples(descriptor: &DescriptorRef, count: usize) -> Vec<Tuple> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| Tuple::new(Arc::clone(descriptor), vec![FieldValue::int(rng.gen())]).unwrap())
        .collect()
}

/// Generates `count` (id, name) tuples from a fixed seed.
pub fn generate_person_tuples(descriptor: &DescriptorRef, count: usize) -> Vec<Tuple> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let name = random_string(&mut rng, 24);
            Tuple::new(
                Arc::clone(descriptor),
                vec![FieldValue::int(i as i32), FieldValue::text(name)],
            )
            .unwrap()
        })
        .collect()
}
