//! Benchmarks for PHP scanning performance

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phpoutline_parser::SourceParser;
use std::path::Path;

fn bench_scan_functions(c: &mut Criterion) {
    let source = r#"<?php
/**
 *  Adds two floats.
 *  @param   float  $a  First number
 *  @param   float  $b  Second number
 *  @return  float  Sum
 */
function add(float $a, float $b): float
{
    return $a + $b;
}

function hello(string $name): string
{
    return "Hello, " . $name . "!";
}
"#;

    c.bench_function("scan_simple_functions", |b| {
        b.iter(|| {
            let mut parser = SourceParser::new();
            parser
                .parse_source(black_box(source), Path::new("test.php"), "")
                .unwrap()
        })
    });
}

fn bench_scan_class(c: &mut Criterion) {
    let source = r#"<?php
/**
 *  A person record.
 *  @package  People
 */
class Person
{
    /** @var string $name Full name */
    private $name;

    private $age;

    public function __construct(string $name, int $age)
    {
        $this->name = $name;
        $this->age = $age;
    }

    /**
     *  @return  string  The full name
     */
    public function getName(): string
    {
        return $this->name;
    }

    public static function create(string $name, int $age): Person
    {
        return new Person($name, $age);
    }
}
"#;

    c.bench_function("scan_class_with_methods", |b| {
        b.iter(|| {
            let mut parser = SourceParser::new();
            parser
                .parse_source(black_box(source), Path::new("test.php"), "")
                .unwrap()
        })
    });
}

fn bench_scan_complex(c: &mut Criterion) {
    let source = r#"<?php
namespace App\Services;

/**
 *  Authentication surfaces.
 *  @category  Services
 *  @package   Auth
 */
interface Authenticatable
{
    public function getIdentifier(): string;
    public function getPassword(): string;
}

trait HasApiTokens
{
    protected $token;

    public function getToken()
    {
        return $this->token;
    }

    public function setToken(string $token): void
    {
        $this->token = $token;
    }
}

abstract class BaseAuthService implements Authenticatable
{
    protected $logger;

    /**
     *  @param   string  $email     Account email
     *  @param   string  $password  Plain-text password
     *  @return  bool
     */
    abstract protected function validateCredentials(string $email, string $password);

    public function authenticate(string $email, string $password)
    {
        if ($this->validateCredentials($email, $password)) {
            return $this->findUser($email);
        }
        return NULL;
    }
}

class JwtAuthService extends BaseAuthService
{
    use HasApiTokens;

    protected function validateCredentials(string $email, string $password)
    {
        $user = $this->findUser($email);
        return $user && password_verify($password, $user->getPassword());
    }
}
"#;

    c.bench_function("scan_complex_file", |b| {
        b.iter(|| {
            let mut parser = SourceParser::new();
            parser
                .parse_source(black_box(source), Path::new("test.php"), "")
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_scan_functions,
    bench_scan_class,
    bench_scan_complex
);
criterion_main!(benches);
