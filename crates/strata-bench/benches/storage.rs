//! Storage layer benchmarks for StrataDB.
//!
//! Benchmarks for:
//! - Page decode at varying occupancy
//! - In-page tuple scans
//! - Full heap file scans through the buffer pool
//! - Whole-page writes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use strata_bench::utils::{
    generate_int_tuples, generate_person_tuples, int_descriptor, person_descriptor,
};
use strata_common::config::StorageConfig;
use strata_common::types::{PageId, SlotId, TableId, TransactionId};
use strata_storage::buffer::BufferPool;
use strata_storage::file::HeapFile;
use strata_storage::schema::DescriptorRef;
use strata_storage::tuple::Tuple;
use strata_storage::HeapPage;

const PAGE_SIZE: usize = 4096;

/// Builds a page holding `tuples` in its first slots.
fn filled_page(id: PageId, descriptor: &DescriptorRef, tuples: &[Tuple]) -> HeapPage {
    let mut page = HeapPage::empty(id, Arc::clone(descriptor), PAGE_SIZE).unwrap();
    for (slot, tuple) in tuples.iter().enumerate() {
        page.put_tuple(SlotId::new(slot as u16), tuple).unwrap();
    }
    page
}

/// Benchmark page decode of narrow INT tuples at varying occupancy.
fn bench_page_decode(c: &mut Criterion) {
    let descriptor = int_descriptor();
    let mut group = c.benchmark_group("storage/page_decode");

    for fill in [64usize, 496, 992].iter() {
        let tuples = generate_int_tuples(&descriptor, *fill);
        let page = filled_page(PageId::new(TableId::new(1), 0), &descriptor, &tuples);
        let bytes = page.encode().to_vec();
        let id = page.id();

        group.throughput(Throughput::Elements(*fill as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fill), fill, |b, _| {
            b.iter(|| {
                HeapPage::decode(
                    id,
                    Arc::clone(&descriptor),
                    PAGE_SIZE,
                    black_box(bytes.clone()),
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark page decode of wide INT+TEXT tuples, where UTF-8
/// validation dominates.
fn bench_page_decode_wide(c: &mut Criterion) {
    let descriptor = person_descriptor();
    let mut group = c.benchmark_group("storage/page_decode_wide");

    for fill in [8usize, 30].iter() {
        let tuples = generate_person_tuples(&descriptor, *fill);
        let page = filled_page(PageId::new(TableId::new(1), 0), &descriptor, &tuples);
        let bytes = page.encode().to_vec();
        let id = page.id();

        group.throughput(Throughput::Elements(*fill as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fill), fill, |b, _| {
            b.iter(|| {
                HeapPage::decode(
                    id,
                    Arc::clone(&descriptor),
                    PAGE_SIZE,
                    black_box(bytes.clone()),
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark scanning the occupied slots of a decoded page.
fn bench_page_scan(c: &mut Criterion) {
    let descriptor = int_descriptor();
    let mut group = c.benchmark_group("storage/page_scan");

    for fill in [64usize, 496, 992].iter() {
        let tuples = generate_int_tuples(&descriptor, *fill);
        let page = filled_page(PageId::new(TableId::new(1), 0), &descriptor, &tuples);

        group.throughput(Throughput::Elements(*fill as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fill), fill, |b, &fill| {
            b.iter(|| {
                let count = black_box(&page).tuples().count();
                assert_eq!(count, fill);
            });
        });
    }

    group.finish();
}

/// Benchmark a full heap file scan through the buffer pool.
fn bench_heap_scan(c: &mut Criterion) {
    let descriptor = int_descriptor();
    let slots_per_page = HeapPage::capacity_for(PAGE_SIZE, 4);

    let mut group = c.benchmark_group("storage/heap_scan");
    group.sample_size(20);

    for num_pages in [4usize, 16, 64].iter() {
        let dir = tempfile::tempdir().unwrap();
        let file = Arc::new(
            HeapFile::create(
                dir.path().join("bench.tbl"),
                Arc::clone(&descriptor),
                &StorageConfig::default(),
            )
            .unwrap(),
        );
        let tuples = generate_int_tuples(&descriptor, num_pages * slots_per_page);
        for (number, chunk) in tuples.chunks(slots_per_page).enumerate() {
            let id = PageId::new(file.id(), number as u32);
            file.write_page(&filled_page(id, &descriptor, chunk)).unwrap();
        }

        let pool = BufferPool::with_capacity(128).unwrap();
        pool.register_file(Arc::clone(&file));
        let expected = num_pages * slots_per_page;

        group.throughput(Throughput::Elements(expected as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_pages),
            num_pages,
            |b, _| {
                b.iter(|| {
                    let mut iter = file.iterator(&pool, TransactionId::new(1));
                    iter.open().unwrap();
                    let mut count = 0usize;
                    while iter.has_next().unwrap() {
                        black_box(iter.next().unwrap());
                        count += 1;
                    }
                    iter.close();
                    assert_eq!(count, expected);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark overwriting one full page on disk.
fn bench_page_write(c: &mut Criterion) {
    let descriptor = int_descriptor();
    let dir = tempfile::tempdir().unwrap();
    let file = HeapFile::create(
        dir.path().join("bench.tbl"),
        Arc::clone(&descriptor),
        &StorageConfig::default(),
    )
    .unwrap();
    let tuples = generate_int_tuples(&descriptor, 992);
    let page = filled_page(PageId::new(file.id(), 0), &descriptor, &tuples);

    let mut group = c.benchmark_group("storage/page_write");
    group.throughput(Throughput::Elements(992));
    group.bench_function("overwrite_page_0", |b| {
        b.iter(|| file.write_page(black_box(&page)).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_page_decode,
    bench_page_decode_wide,
    bench_page_scan,
    bench_heap_scan,
    bench_page_write
);
criterion_main!(benches);
