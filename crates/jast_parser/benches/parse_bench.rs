use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jast_parser::Parser;

// A medium-size Java source with various constructs
const JAVA_SOURCE: &str = r#"
package com.example.users;

import java.util.*;
import java.util.function.Predicate;
import static java.util.Objects.requireNonNull;

public sealed interface Shape permits Circle, Square {
    double area();
}

record Circle(double radius) implements Shape {
    Circle {
        if (radius < 0) throw new IllegalArgumentException("radius");
    }

    public double area() {
        return Math.PI * radius * radius;
    }
}

record Square(double side) implements Shape {
    public double area() { return side * side; }
}

public class UserService<T extends Comparable<T>> {
    private final Map<Long, List<T>> users = new HashMap<>();
    private long nextId = 1L;

    @Override
    public String toString() {
        return "UserService[" + users.size() + "]";
    }

    public long create(T user) {
        requireNonNull(user);
        long id = nextId++;
        users.computeIfAbsent(id, k -> new ArrayList<>()).add(user);
        return id;
    }

    public List<T> filter(Predicate<? super T> predicate) {
        List<T> result = new ArrayList<>();
        for (List<T> group : users.values()) {
            for (T user : group) {
                if (predicate.test(user)) {
                    result.add(user);
                }
            }
        }
        result.sort(Comparator.naturalOrder());
        return result;
    }

    static String describe(Object o) {
        return switch (o) {
            case Circle c when c.radius() > 10 -> "big circle";
            case Circle c -> "circle";
            case Square s -> "square " + s.side();
            default -> {
                String name = o.getClass().getSimpleName();
                yield name.isEmpty() ? "?" : name;
            }
        };
    }

    int checksum(int[] data) {
        int sum = 0;
        for (int i = 0; i < data.length; i++) {
            sum = (sum << 5) ^ (sum >>> 27) ^ data[i];
        }
        try (var in = new java.io.StringReader("x")) {
            return sum + in.read();
        } catch (java.io.IOException | RuntimeException e) {
            return -1;
        } finally {
            users.clear();
        }
    }
}
"#;

fn bench_parse_java(c: &mut Criterion) {
    c.bench_function("parse_java_medium", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(JAVA_SOURCE)).unwrap();
            let tree = parser.parse_compilation_unit().unwrap();
            black_box(tree);
        });
    });
}

criterion_group!(benches, bench_parse_java);
criterion_main!(benches);
