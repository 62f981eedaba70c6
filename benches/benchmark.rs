use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tfidf_matcher::{rank, score, TFIDFVectorizer, VectorizerConfig};

const SKILLS: &[&str] = &[
    "python", "rust", "java", "kotlin", "aws", "gcp", "azure", "kubernetes", "docker", "terraform", "postgres",
    "mysql", "redis", "kafka", "spark", "airflow", "react", "typescript", "graphql", "grpc", "linux", "ansible",
    "pandas", "numpy", "pytorch", "tensorflow", "django", "flask", "spring", "microservices",
];

// 擬似乱数で決定的な履歴書を作る
fn synthetic_resumes(n: usize, words: usize) -> Vec<String> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    (0..n)
        .map(|_| {
            (0..words)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    SKILLS[(state % SKILLS.len() as u64) as usize]
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn match_benchmark(c: &mut Criterion) {
    let job = "Senior Python engineer with AWS, Kubernetes, Kafka and Spark experience";
    let resumes = synthetic_resumes(200, 300);
    let mut corpus: Vec<&str> = vec![job];
    corpus.extend(resumes.iter().map(String::as_str));

    c.bench_function("fit", |b| {
        b.iter(|| {
            let mut v: TFIDFVectorizer<f32> = TFIDFVectorizer::new(VectorizerConfig::default()).unwrap();
            v.fit(black_box(&corpus)).unwrap();
            v
        });
    });

    let mut v: TFIDFVectorizer<f32> = TFIDFVectorizer::new(VectorizerConfig::default()).unwrap();
    v.fit(&corpus).unwrap();

    c.bench_function("transform_batch", |b| {
        b.iter(|| v.transform_batch(black_box(&corpus)).unwrap());
    });

    let vectors = v.transform_batch(&corpus).unwrap();
    c.bench_function("score_and_rank", |b| {
        b.iter(|| {
            let scores = score(&vectors[0], black_box(&vectors[1..])).unwrap();
            rank(scores.into_iter().enumerate(), 10)
        });
    });
}

criterion_group!(benches, match_benchmark);
criterion_main!(benches);
