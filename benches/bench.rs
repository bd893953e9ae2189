// Criterion benchmarks for Scholar Algo

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scholar_algo::core::{cosine_similarity, eligibility::filter_eligible, Matcher};
use scholar_algo::models::{ApplicantProfile, ScholarshipRecord};
use scholar_algo::services::embedding::{EmbeddingError, TextEncoder};

/// Cheap deterministic encoder so the benches measure the pipeline, not ONNX
/// inference. Vectors are derived from the text bytes; never zero.
struct ByteFoldEncoder;

impl ByteFoldEncoder {
    fn vector_for(text: &str) -> Vec<f32> {
        let mut vector = vec![1.0_f32; 8];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % 8] += byte as f32 / 255.0;
        }
        vector
    }
}

#[async_trait]
impl TextEncoder for ByteFoldEncoder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(Self::vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| Self::vector_for(t)).collect())
    }

    fn dimension(&self) -> usize {
        8
    }

    fn model_name(&self) -> &str {
        "byte-fold"
    }
}

fn create_applicant() -> ApplicantProfile {
    ApplicantProfile {
        id: "bench_applicant".to_string(),
        age: 22,
        country: "Kenya".to_string(),
        education_level: "Undergraduate".to_string(),
        gpa: 3.6,
        field_of_study: "Computer Science".to_string(),
        financial_need: true,
        phone_number: None,
    }
}

fn create_scholarship(id: usize) -> ScholarshipRecord {
    ScholarshipRecord {
        id: id.to_string(),
        name: format!("Scholarship {}", id),
        description: "Supports students in technical programs".to_string(),
        requirements: "Transcript and essay".to_string(),
        field_of_study: if id % 3 == 0 {
            Some("Computer Science Engineering".to_string())
        } else {
            None
        },
        country: if id % 4 == 0 {
            Some("International".to_string())
        } else {
            None
        },
        education_level: if id % 5 == 0 {
            Some("Undergraduate".to_string())
        } else {
            None
        },
        min_gpa: if id % 2 == 0 { Some(3.0 + (id % 10) as f64 / 10.0) } else { None },
        min_age: None,
        max_age: None,
        amount: 1000.0 + id as f64,
        deadline: "2026-12-31".to_string(),
        application_url: "https://example.org/apply".to_string(),
    }
}

fn bench_cosine_similarity(c: &mut Criterion) {
    // Model-sized vectors (384 dimensions)
    let a: Vec<f32> = (0..384).map(|i| ((i % 7) as f32 + 1.0) / 7.0).collect();
    let b: Vec<f32> = (0..384).map(|i| ((i % 5) as f32 + 1.0) / 5.0).collect();

    c.bench_function("cosine_similarity_384", |bench| {
        bench.iter(|| cosine_similarity(black_box(&a), black_box(&b)));
    });
}

fn bench_eligibility_filter(c: &mut Criterion) {
    let applicant = create_applicant();

    let mut group = c.benchmark_group("eligibility_filter");

    for catalog_size in [10, 100, 1000].iter() {
        let scholarships: Vec<ScholarshipRecord> =
            (0..*catalog_size).map(create_scholarship).collect();

        group.bench_with_input(
            BenchmarkId::new("filter_eligible", catalog_size),
            catalog_size,
            |bench, _| {
                bench.iter(|| {
                    filter_eligible(black_box(&applicant), black_box(scholarships.clone()))
                });
            },
        );
    }

    group.finish();
}

fn bench_full_ranking(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
    let matcher = Matcher::with_default_top_k();
    let encoder = ByteFoldEncoder;
    let applicant = create_applicant();

    let mut group = c.benchmark_group("ranking");

    for catalog_size in [10, 100, 500].iter() {
        let scholarships: Vec<ScholarshipRecord> =
            (0..*catalog_size).map(create_scholarship).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", catalog_size),
            catalog_size,
            |bench, _| {
                bench.iter(|| {
                    runtime
                        .block_on(matcher.rank(
                            black_box(&applicant),
                            black_box(scholarships.clone()),
                            &encoder,
                        ))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cosine_similarity,
    bench_eligibility_filter,
    bench_full_ranking
);

criterion_main!(benches);
