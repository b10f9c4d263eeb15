use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use mailbox_core::{
    core::services::RenewalService,
    domain::{FeeSchedule, RateBook, RateConfiguration, RateDraft, RecipientSnapshot, RenewalPeriod},
    storage::json_backend::{load_book_from_path, save_book_to_path},
};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn fees() -> FeeSchedule {
    FeeSchedule {
        base_rate_three_month: Decimal::new(5100, 2),
        base_rate_six_month: Decimal::new(9600, 2),
        base_rate_twelve_month: Decimal::new(18000, 2),
        business_account_fee: Decimal::new(400, 2),
        fourth_recipient_fee: Decimal::new(200, 2),
        fifth_recipient_fee: Decimal::new(200, 2),
        sixth_recipient_fee: Decimal::new(250, 2),
        seventh_recipient_fee: Decimal::new(250, 2),
        minor_recipient_fee: Decimal::new(150, 2),
        key_deposit: Decimal::new(1000, 2),
    }
}

fn build_book(config_count: usize) -> RateBook {
    let mut book = RateBook::new();
    let first = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    for idx in 0..config_count {
        let start = first + Duration::days(30 * idx as i64);
        book.supersede(RateDraft::new(start, fees()), first)
            .expect("supersede");
    }
    book
}

fn bench_renewal(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let rate = RateConfiguration::from_draft(RateDraft::new(start, fees())).expect("rate");
    let recipients = vec![
        RecipientSnapshot::business("Acme"),
        RecipientSnapshot::person("Adult", Some(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap())),
        RecipientSnapshot::person("Twin A", Some(NaiveDate::from_ymd_opt(2007, 4, 10).unwrap())),
        RecipientSnapshot::person("Twin B", Some(NaiveDate::from_ymd_opt(2007, 4, 10).unwrap())),
        RecipientSnapshot::person("Teen", Some(NaiveDate::from_ymd_opt(2007, 9, 2).unwrap())),
        RecipientSnapshot::person("Child", Some(NaiveDate::from_ymd_opt(2015, 5, 5).unwrap())),
    ];

    c.bench_function("renewal_annual_with_transitions", |b| {
        b.iter(|| {
            let renewal = RenewalService::calculate(
                black_box(&rate),
                RenewalPeriod::TwelveMonth,
                black_box(&recipients),
                start,
            )
            .expect("renewal");
            black_box(renewal);
        })
    });
}

fn bench_rate_book_io(c: &mut Criterion) {
    let book = build_book(black_box(500));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("rates.json");

    c.bench_function("rate_book_save_500", |b| {
        b.iter(|| {
            save_book_to_path(&book, &file_path).expect("save rate book");
        })
    });

    save_book_to_path(&book, &file_path).expect("seed");

    c.bench_function("rate_book_load_500", |b| {
        b.iter(|| {
            let loaded = load_book_from_path(&file_path).expect("load rate book");
            black_box(loaded);
        })
    });

    c.bench_function("rate_book_lookup_500", |b| {
        b.iter_batched(
            || NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
            |date| black_box(book.effective_at(date).map(|config| config.id)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_renewal, bench_rate_book_io);
criterion_main!(benches);
