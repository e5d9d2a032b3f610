use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use shopkeep_core::{Record, RecordResult, deserialize, serialize};
use shopkeep_inventory::Item;
use shopkeep_store::{CollectionStore, StoreConfig};

fn build_store(count: usize) -> RecordResult<CollectionStore<Item>> {
    let mut store = CollectionStore::with_config(StoreConfig::default());
    for i in 0..count {
        store.add(Item::electronic(format!("Item {i}"), 9.99, 10, 12)?)?;
    }
    Ok(store)
}

fn bench_document_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_mapping");
    let item = Item::electronic("Mouse", 15.5, 3, 12).unwrap();
    let value = serde_json::Value::Object(serialize(&item));

    group.bench_function("serialize_item", |b| {
        b.iter(|| serialize(black_box(&item)));
    });

    group.bench_function("deserialize_item", |b| {
        b.iter(|| deserialize::<Item>(black_box(&value)).unwrap());
    });

    group.finish();
}

fn bench_save_load_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("save_load_round_trip");
    let path = std::env::temp_dir().join(format!("shopkeep-bench-{}.json", uuid::Uuid::now_v7()));

    for count in [10usize, 100, 1_000].iter() {
        let store = build_store(*count).unwrap();
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("save_then_load", count), count, |b, _| {
            b.iter(|| {
                store.save(&path).unwrap();
                let mut fresh: CollectionStore<Item> = CollectionStore::new();
                let report = fresh.load(&path).unwrap();
                assert_eq!(report.loaded, store.len());
            });
        });
    }

    let _ = std::fs::remove_file(&path);
    group.finish();
}

fn bench_positional_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("positional_updates");
    let mut store = build_store(1_000).unwrap();

    group.bench_function("update_field_middle", |b| {
        b.iter(|| store.update_field(black_box(500), "cantidad", "7").unwrap());
    });

    group.bench_function("remove_then_add_front", |b| {
        b.iter(|| {
            let item = store.remove_at(0).unwrap();
            store.add(item).unwrap();
        });
    });

    group.finish();
    assert_eq!(store.records()[0].variant_tag(), "ProductoElectronico");
}

criterion_group!(
    benches,
    bench_document_mapping,
    bench_save_load_round_trip,
    bench_positional_updates
);
criterion_main!(benches);
