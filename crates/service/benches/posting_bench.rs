use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use models::posting::PostingStatus;
use service::identity::Actor;
use service::pagination::Pagination;
use service::posting::domain::{CreatePostInput, PostingConfig, SortMethod};
use service::posting::repository::mock::MockPostingRepository;
use service::posting::PostingService;

fn bench_listing(c: &mut Criterion) {
    let repo = Arc::new(MockPostingRepository::with_quota(Some(i32::MAX)));
    let svc = PostingService::new(repo, PostingConfig::default());
    let rt = tokio::runtime::Runtime::new().unwrap();

    // seed postings from a handful of authors, some with sympathies
    let authors: Vec<Actor> = (0..20).map(|_| Actor::user(uuid::Uuid::new_v4())).collect();
    for i in 0..2_000 {
        let author = &authors[i % authors.len()];
        let input = CreatePostInput { title: None, text: format!("posting #{i}"), tag: None };
        let p = rt.block_on(svc.create(author, input)).unwrap();
        if i % 3 == 0 {
            rt.block_on(svc.sign_sympathy(&authors[(i + 1) % authors.len()], p.id)).unwrap();
        }
    }

    c.bench_function("list_waiting_by_sympathy", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.list_by_status_and_sort(PostingStatus::Waiting, SortMethod::Sympathy)).unwrap();
        });
    });

    c.bench_function("list_page_20", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.list_page(Pagination { page: 3, per_page: 20 })).unwrap();
        });
    });
}

criterion_group!(benches, bench_listing);
criterion_main!(benches);
